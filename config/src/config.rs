// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use error::Error;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::instrument;

const DEFAULT_LANGUAGE: &str = "en-US";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub credentials: CredentialsConfig,
  #[serde(default)]
  pub api: ApiConfig,
  #[serde(default)]
  pub locations: Vec<LocationConfig>,
}

#[derive(Clone, Deserialize)]
pub struct CredentialsConfig {
  pub key_id: String,
  pub service_id: String,
  pub team_id: String,
  pub key_pem: Option<String>,
  pub key_path: Option<PathBuf>,
}

/// Overrides for the WeatherKit endpoint. Unset fields keep the client defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
  pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationConfig {
  pub name: String,
  pub latitude: f64,
  pub longitude: f64,
  #[serde(default = "default_language")]
  pub language: String,
}

fn default_language() -> String {
  DEFAULT_LANGUAGE.to_string()
}

impl Config {
  #[instrument(skip(path))]
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
    let content = fs::read_to_string(path)?;
    let config = Self::from_toml_str(&content)?;
    tracing::debug!("Loaded configuration successfully");
    Ok(config)
  }

  pub fn from_toml_str(content: &str) -> Result<Self, Error> {
    let config: Self = toml::from_str(content)
      .map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<(), Error> {
    match (&self.credentials.key_pem, &self.credentials.key_path) {
      (Some(_), Some(_)) => {
        return Err(Error::ConfigError(
          "Only one of key_pem and key_path may be set".into(),
        ))
      }
      (None, None) => {
        return Err(Error::ConfigError(
          "One of key_pem or key_path is required".into(),
        ))
      }
      _ => {}
    }

    if self.locations.is_empty() {
      return Err(Error::ConfigError(
        "At least one [[locations]] entry is required".into(),
      ));
    }

    let mut names = HashSet::new();
    for location in &self.locations {
      if !names.insert(location.name.as_str()) {
        return Err(Error::ConfigError(format!(
          "Duplicate location name: {}",
          location.name
        )));
      }
      if !(-90.0..=90.0).contains(&location.latitude) {
        return Err(Error::ConfigError(format!(
          "Latitude out of range for {}: {}",
          location.name, location.latitude
        )));
      }
      if !(-180.0..=180.0).contains(&location.longitude) {
        return Err(Error::ConfigError(format!(
          "Longitude out of range for {}: {}",
          location.name, location.longitude
        )));
      }
    }

    Ok(())
  }
}

impl CredentialsConfig {
  /// Returns the PEM-encoded signing key, reading `key_path` when the key is not inline.
  pub fn key_pem(&self) -> Result<String, Error> {
    match (&self.key_pem, &self.key_path) {
      (Some(pem), _) => Ok(pem.clone()),
      (None, Some(path)) => Ok(fs::read_to_string(path)?),
      (None, None) => Err(Error::ConfigError(
        "One of key_pem or key_path is required".into(),
      )),
    }
  }
}

// Key material stays out of logs.
impl std::fmt::Debug for CredentialsConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CredentialsConfig")
      .field("key_id", &self.key_id)
      .field("service_id", &self.service_id)
      .field("team_id", &self.team_id)
      .field("key_pem", &self.key_pem.as_ref().map(|_| "<redacted>"))
      .field("key_path", &self.key_path)
      .finish()
  }
}
