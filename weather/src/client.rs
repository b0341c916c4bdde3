// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  config::Credentials,
  constants::{API_BASE_URL, REQUEST_TIMEOUT},
  models::DataSet,
  token,
};
use async_trait::async_trait;
use chrono::Utc;
use error::Error;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error, instrument, warn};
use url::Url;

const WEATHER_DATA_SETS: [DataSet; 2] = [DataSet::CurrentWeather, DataSet::ForecastDaily];

#[async_trait]
pub trait WeatherKitApi: Send + Sync {
  async fn get_current_and_daily_forecast(
    &self,
    latitude: f64,
    longitude: f64,
    language: &str,
  ) -> Result<Value, Error>;

  async fn get_availability(&self, latitude: f64, longitude: f64) -> Result<Value, Error>;
}

#[derive(Debug, Clone)]
pub struct WeatherKitClient {
  credentials: Credentials,
  client: reqwest::Client,
  base_url: String,
  timeout: Duration,
}

impl WeatherKitClient {
  pub fn builder() -> WeatherKitClientBuilder {
    WeatherKitClientBuilder::default()
  }

  pub fn new(credentials: Credentials) -> Result<Self, Error> {
    Self::builder().credentials(credentials).build()
  }

  fn endpoint(&self, path: &str) -> Result<Url, Error> {
    Url::parse(&format!("{}{}", self.base_url, path)).map_err(Error::client)
  }

  async fn get_json(&self, url: Url) -> Result<Value, Error> {
    // Tokens live for one minute, so each request signs its own.
    let token = token::sign(&self.credentials, Utc::now())?;

    let exchange = async {
      let response = self
        .client
        .get(url)
        .bearer_auth(token.as_str())
        .send()
        .await
        .map_err(transport_error)?;

      let status = response.status();
      if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        warn!("API rejected credentials with status: {}", status);
        return Err(Error::AuthenticationError("Invalid credentials".into()));
      }
      if !status.is_success() {
        error!("API request failed with status: {}", status);
        return Err(Error::http_status(status.as_u16()));
      }

      let body = response.bytes().await.map_err(transport_error)?;
      serde_json::from_slice::<Value>(&body).map_err(Error::client)
    };

    timeout(self.timeout, exchange)
      .await
      .map_err(|_| Error::communication("Timeout error fetching information"))?
  }
}

#[async_trait]
impl WeatherKitApi for WeatherKitClient {
  #[instrument(skip(self))]
  async fn get_current_and_daily_forecast(
    &self,
    latitude: f64,
    longitude: f64,
    language: &str,
  ) -> Result<Value, Error> {
    let data_sets = WEATHER_DATA_SETS
      .iter()
      .map(DataSet::as_str)
      .collect::<Vec<_>>()
      .join(",");
    let url = self.endpoint(&format!(
      "/api/v1/weather/{}/{}/{}?dataSets={}",
      language, latitude, longitude, data_sets
    ))?;

    debug!("Requesting weather data");
    self.get_json(url).await
  }

  #[instrument(skip(self))]
  async fn get_availability(&self, latitude: f64, longitude: f64) -> Result<Value, Error> {
    let url = self.endpoint(&format!("/api/v1/availability/{}/{}", latitude, longitude))?;

    debug!("Requesting data set availability");
    self.get_json(url).await
  }
}

fn transport_error(e: reqwest::Error) -> Error {
  if e.is_builder() {
    return Error::client(e);
  }
  if e.is_timeout() {
    return Error::communication("Timeout error fetching information");
  }
  Error::communication(e.to_string())
}

pub struct WeatherKitClientBuilder {
  credentials: Option<Credentials>,
  base_url: String,
  timeout: Duration,
}

impl Default for WeatherKitClientBuilder {
  fn default() -> Self {
    Self {
      credentials: None,
      base_url: API_BASE_URL.to_string(),
      timeout: REQUEST_TIMEOUT,
    }
  }
}

impl WeatherKitClientBuilder {
  pub fn credentials(mut self, credentials: Credentials) -> Self {
    self.credentials = Some(credentials);
    self
  }

  pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  pub fn timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  pub fn build(self) -> Result<WeatherKitClient, Error> {
    let credentials = self
      .credentials
      .ok_or_else(|| Error::ConfigError("Credentials are required".into()))?;

    let base_url = self.base_url.trim_end_matches('/').to_string();
    Url::parse(&base_url)
      .map_err(|e| Error::ConfigError(format!("Invalid API base URL '{}': {}", base_url, e)))?;

    let client = reqwest::Client::builder()
      .timeout(self.timeout)
      .build()
      .map_err(|e| Error::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

    Ok(WeatherKitClient {
      credentials,
      client,
      base_url,
      timeout: self.timeout,
    })
  }
}
