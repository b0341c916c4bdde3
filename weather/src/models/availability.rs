// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use serde_json::Value;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataSet {
  CurrentWeather,
  ForecastDaily,
  ForecastHourly,
  ForecastNextHour,
}

impl DataSet {
  pub fn as_str(&self) -> &'static str {
    match self {
      DataSet::CurrentWeather => "currentWeather",
      DataSet::ForecastDaily => "forecastDaily",
      DataSet::ForecastHourly => "forecastHourly",
      DataSet::ForecastNextHour => "forecastNextHour",
    }
  }

  pub fn from_name(name: &str) -> Option<Self> {
    match name {
      "currentWeather" => Some(DataSet::CurrentWeather),
      "forecastDaily" => Some(DataSet::ForecastDaily),
      "forecastHourly" => Some(DataSet::ForecastHourly),
      "forecastNextHour" => Some(DataSet::ForecastNextHour),
      _ => None,
    }
  }
}

impl std::fmt::Display for DataSet {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Data sets the service can supply for one coordinate pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Availability {
  data_sets: BTreeSet<DataSet>,
}

impl Availability {
  /// Accepts either an array of data set names or an object of name → bool.
  pub fn from_json(value: &Value) -> Self {
    let data_sets = match value {
      Value::Array(items) => items
        .iter()
        .filter_map(Value::as_str)
        .filter_map(DataSet::from_name)
        .collect(),
      Value::Object(map) => map
        .iter()
        .filter(|(_, supported)| supported.as_bool() == Some(true))
        .filter_map(|(name, _)| DataSet::from_name(name))
        .collect(),
      _ => BTreeSet::new(),
    };

    Self { data_sets }
  }

  pub fn supports(&self, data_set: DataSet) -> bool {
    self.data_sets.contains(&data_set)
  }

  /// A location is usable when either current conditions or the daily forecast exist.
  pub fn is_usable(&self) -> bool {
    self.supports(DataSet::CurrentWeather) || self.supports(DataSet::ForecastDaily)
  }

  pub fn data_sets(&self) -> impl Iterator<Item = DataSet> + '_ {
    self.data_sets.iter().copied()
  }
}
