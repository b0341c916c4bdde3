// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::client::WeatherKitApi;
use async_trait::async_trait;
use error::Error;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory API that replays queued results and counts calls.
#[derive(Default)]
pub(crate) struct ScriptedApi {
  weather: Mutex<VecDeque<Result<Value, Error>>>,
  availability: Mutex<VecDeque<Result<Value, Error>>>,
  latency: Option<Duration>,
  weather_calls: AtomicUsize,
  availability_calls: AtomicUsize,
  in_flight: AtomicUsize,
  max_in_flight: AtomicUsize,
}

impl ScriptedApi {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
    self.latency = Some(latency);
    self
  }

  pub(crate) fn push_weather(&self, result: Result<Value, Error>) {
    self.weather.lock().unwrap().push_back(result);
  }

  pub(crate) fn push_availability(&self, result: Result<Value, Error>) {
    self.availability.lock().unwrap().push_back(result);
  }

  pub(crate) fn weather_calls(&self) -> usize {
    self.weather_calls.load(Ordering::SeqCst)
  }

  pub(crate) fn availability_calls(&self) -> usize {
    self.availability_calls.load(Ordering::SeqCst)
  }

  pub(crate) fn max_in_flight(&self) -> usize {
    self.max_in_flight.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl WeatherKitApi for ScriptedApi {
  async fn get_current_and_daily_forecast(
    &self,
    _latitude: f64,
    _longitude: f64,
    _language: &str,
  ) -> Result<Value, Error> {
    self.weather_calls.fetch_add(1, Ordering::SeqCst);
    let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    self.max_in_flight.fetch_max(current, Ordering::SeqCst);

    if let Some(latency) = self.latency {
      tokio::time::sleep(latency).await;
    }

    self.in_flight.fetch_sub(1, Ordering::SeqCst);
    self
      .weather
      .lock()
      .unwrap()
      .pop_front()
      .unwrap_or_else(|| Err(Error::communication("no scripted response")))
  }

  async fn get_availability(&self, _latitude: f64, _longitude: f64) -> Result<Value, Error> {
    self.availability_calls.fetch_add(1, Ordering::SeqCst);
    self
      .availability
      .lock()
      .unwrap()
      .pop_front()
      .unwrap_or_else(|| Err(Error::communication("no scripted response")))
  }
}
