// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use serde::Serialize;
use tracing::warn;

/// Display category for a WeatherKit condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
  ClearNight,
  Cloudy,
  Exceptional,
  Fog,
  Hail,
  Lightning,
  Partlycloudy,
  Pouring,
  Rainy,
  Snowy,
  SnowyRainy,
  Sunny,
  Windy,
  Unknown,
}

impl Condition {
  /// Unmapped codes fall back to [`Condition::Unknown`].
  pub fn from_code(code: &str) -> Self {
    match code {
      "Clear" | "MostlyClear" | "Hot" => Condition::Sunny,
      "Cloudy" | "MostlyCloudy" => Condition::Cloudy,
      "PartlyCloudy" => Condition::Partlycloudy,
      "Foggy" | "Haze" | "Smoky" => Condition::Fog,
      "BlowingDust" | "Breezy" | "Windy" => Condition::Windy,
      "Drizzle" | "Rain" | "SunShowers" => Condition::Rainy,
      "HeavyRain" => Condition::Pouring,
      "IsolatedThunderstorms" | "ScatteredThunderstorms" | "StrongStorms" | "Thunderstorms" => {
        Condition::Lightning
      }
      "Hail" => Condition::Hail,
      "Frigid" | "Flurries" | "Sleet" | "Snow" | "SunFlurries" | "WintryMix" | "Blizzard"
      | "BlowingSnow" | "HeavySnow" => Condition::Snowy,
      "FreezingDrizzle" | "FreezingRain" => Condition::SnowyRainy,
      "Hurricane" | "TropicalStorm" => Condition::Exceptional,
      other => {
        warn!("Unmapped condition code: {}", other);
        Condition::Unknown
      }
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Condition::ClearNight => "clear-night",
      Condition::Cloudy => "cloudy",
      Condition::Exceptional => "exceptional",
      Condition::Fog => "fog",
      Condition::Hail => "hail",
      Condition::Lightning => "lightning",
      Condition::Partlycloudy => "partlycloudy",
      Condition::Pouring => "pouring",
      Condition::Rainy => "rainy",
      Condition::Snowy => "snowy",
      Condition::SnowyRainy => "snowy-rainy",
      Condition::Sunny => "sunny",
      Condition::Windy => "windy",
      Condition::Unknown => "unknown",
    }
  }
}

impl std::fmt::Display for Condition {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}
