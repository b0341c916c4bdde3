// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
pub mod client;
pub mod config;
pub mod coordinator;
pub mod models;
pub mod registry;
pub mod setup;
pub mod token;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{WeatherKitApi, WeatherKitClient, WeatherKitClientBuilder};
pub use config::{Credentials, Location};
pub use coordinator::{CoordinatorState, CoordinatorStatus, FailureKind, UpdateCoordinator};
pub use models::{Availability, Condition, DataSet, WeatherSnapshot};
pub use registry::CoordinatorRegistry;
pub use setup::SetupFailure;
pub use token::SignedToken;

pub mod constants {
  use std::time::Duration;
  pub(crate) const API_BASE_URL: &str = "https://weatherkit.apple.com";
  pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
  pub(crate) const TOKEN_LIFETIME_SECS: i64 = 60;
  pub(crate) const DEFAULT_LANGUAGE: &str = "en-US";
  pub const UPDATE_INTERVAL: Duration = Duration::from_secs(15 * 60);
  pub const ATTRIBUTION: &str =
    "Data provided by Apple Weather. https://developer.apple.com/weatherkit/data-source-attribution/";
}

#[cfg(test)]
mod tests {
  use super::constants::*;

  #[test]
  fn attribution_names_apple_weather_and_links_its_terms() {
    assert!(ATTRIBUTION.starts_with("Data provided by Apple Weather."));
    assert!(ATTRIBUTION.ends_with("https://developer.apple.com/weatherkit/data-source-attribution/"));
  }
}
