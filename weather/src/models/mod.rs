// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
pub mod availability;
pub mod condition;
pub mod snapshot;

pub use availability::{Availability, DataSet};
pub use condition::Condition;
pub use snapshot::{CurrentWeather, DailyForecast, HourlyForecast, WeatherSnapshot};
