// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use super::condition::Condition;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// The last successful payload for one location, kept exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
  raw: Value,
}

/// Read-only view over the `currentWeather` section.
#[derive(Debug, Clone, Copy)]
pub struct CurrentWeather<'a> {
  data: &'a Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyForecast {
  pub datetime: Option<DateTime<Utc>>,
  pub condition: Option<Condition>,
  pub temperature: Option<f64>,
  pub templow: Option<f64>,
  pub precipitation: Option<f64>,
  pub precipitation_probability: Option<f64>,
  pub uv_index: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyForecast {
  pub datetime: Option<DateTime<Utc>>,
  pub condition: Option<Condition>,
  pub temperature: Option<f64>,
  pub apparent_temperature: Option<f64>,
  pub dew_point: Option<f64>,
  pub pressure: Option<f64>,
  pub wind_gust_speed: Option<f64>,
  pub wind_speed: Option<f64>,
  pub wind_bearing: Option<f64>,
  pub humidity: Option<f64>,
  pub precipitation: Option<f64>,
  pub precipitation_probability: Option<f64>,
  pub cloud_coverage: Option<f64>,
  pub uv_index: Option<f64>,
}

impl WeatherSnapshot {
  pub fn new(raw: Value) -> Self {
    Self { raw }
  }

  pub fn raw(&self) -> &Value {
    &self.raw
  }

  pub fn current(&self) -> Option<CurrentWeather<'_>> {
    self
      .raw
      .get("currentWeather")
      .filter(|v| v.is_object())
      .map(|data| CurrentWeather { data })
  }

  pub fn daily_forecast(&self) -> Option<Vec<DailyForecast>> {
    let days = self.raw.get("forecastDaily")?.get("days")?.as_array()?;
    Some(days.iter().map(DailyForecast::from_json).collect())
  }

  pub fn hourly_forecast(&self) -> Option<Vec<HourlyForecast>> {
    let hours = self.raw.get("forecastHourly")?.get("hours")?.as_array()?;
    Some(hours.iter().map(HourlyForecast::from_json).collect())
  }
}

impl From<Value> for WeatherSnapshot {
  fn from(raw: Value) -> Self {
    Self::new(raw)
  }
}

impl<'a> CurrentWeather<'a> {
  pub fn condition_code(&self) -> Option<&'a str> {
    self.data.get("conditionCode")?.as_str()
  }

  /// Sunny at night is reported as [`Condition::ClearNight`].
  pub fn condition(&self) -> Option<Condition> {
    let condition = Condition::from_code(self.condition_code()?);
    if condition == Condition::Sunny && self.daylight() == Some(false) {
      return Some(Condition::ClearNight);
    }
    Some(condition)
  }

  pub fn daylight(&self) -> Option<bool> {
    self.data.get("daylight")?.as_bool()
  }

  pub fn temperature(&self) -> Option<f64> {
    number(self.data, "temperature")
  }

  pub fn apparent_temperature(&self) -> Option<f64> {
    number(self.data, "temperatureApparent")
  }

  pub fn dew_point(&self) -> Option<f64> {
    number(self.data, "temperatureDewPoint")
  }

  pub fn pressure(&self) -> Option<f64> {
    number(self.data, "pressure")
  }

  /// Percent.
  pub fn humidity(&self) -> Option<f64> {
    percent(self.data, "humidity")
  }

  /// Percent.
  pub fn cloud_coverage(&self) -> Option<f64> {
    percent(self.data, "cloudCover")
  }

  pub fn uv_index(&self) -> Option<f64> {
    number(self.data, "uvIndex")
  }

  /// Kilometers.
  pub fn visibility(&self) -> Option<f64> {
    number(self.data, "visibility").map(|meters| meters / 1000.0)
  }

  pub fn wind_speed(&self) -> Option<f64> {
    number(self.data, "windSpeed")
  }

  pub fn wind_gust_speed(&self) -> Option<f64> {
    number(self.data, "windGust")
  }

  pub fn wind_bearing(&self) -> Option<f64> {
    number(self.data, "windDirection")
  }
}

impl DailyForecast {
  fn from_json(day: &Value) -> Self {
    Self {
      datetime: timestamp(day, "forecastStart"),
      condition: condition(day),
      temperature: number(day, "temperatureMax"),
      templow: number(day, "temperatureMin"),
      precipitation: number(day, "precipitationAmount"),
      precipitation_probability: percent(day, "precipitationChance"),
      uv_index: number(day, "maxUvIndex"),
    }
  }
}

impl HourlyForecast {
  fn from_json(hour: &Value) -> Self {
    Self {
      datetime: timestamp(hour, "forecastStart"),
      condition: condition(hour),
      temperature: number(hour, "temperature"),
      apparent_temperature: number(hour, "temperatureApparent"),
      dew_point: number(hour, "temperatureDewPoint"),
      pressure: number(hour, "pressure"),
      wind_gust_speed: number(hour, "windGust"),
      wind_speed: number(hour, "windSpeed"),
      wind_bearing: number(hour, "windDirection"),
      humidity: percent(hour, "humidity"),
      precipitation: number(hour, "precipitationAmount"),
      precipitation_probability: percent(hour, "precipitationChance"),
      cloud_coverage: percent(hour, "cloudCover"),
      uv_index: number(hour, "uvIndex"),
    }
  }
}

fn number(data: &Value, key: &str) -> Option<f64> {
  data.get(key)?.as_f64()
}

fn percent(data: &Value, key: &str) -> Option<f64> {
  number(data, key).map(|fraction| fraction * 100.0)
}

fn condition(data: &Value) -> Option<Condition> {
  data
    .get("conditionCode")?
    .as_str()
    .map(Condition::from_code)
}

fn timestamp(data: &Value, key: &str) -> Option<DateTime<Utc>> {
  let text = data.get(key)?.as_str()?;
  DateTime::parse_from_rfc3339(text)
    .map(|dt| dt.with_timezone(&Utc))
    .ok()
}
