// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  client::WeatherKitApi, config::Location, coordinator::UpdateCoordinator, models::Availability,
};
use error::{Error, ErrorKind};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// What the person configuring a location is told when setup fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupFailure {
  Auth,
  UnsupportedLocation,
  Connection,
  Unknown,
}

impl SetupFailure {
  pub fn from_error(err: &Error) -> Self {
    match err.kind() {
      ErrorKind::Authentication => SetupFailure::Auth,
      ErrorKind::UnsupportedLocation => SetupFailure::UnsupportedLocation,
      ErrorKind::Communication => SetupFailure::Connection,
      ErrorKind::Client | ErrorKind::Configuration => SetupFailure::Unknown,
    }
  }

  pub fn message(&self) -> &'static str {
    match self {
      SetupFailure::Auth => "Authentication failed, check the key id, service id, team id and private key",
      SetupFailure::UnsupportedLocation => "WeatherKit has no current or daily data for this location",
      SetupFailure::Connection => "Failed to connect to WeatherKit",
      SetupFailure::Unknown => "Unexpected error while setting up WeatherKit",
    }
  }
}

impl std::fmt::Display for SetupFailure {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.message())
  }
}

/// Asks the service which data sets exist for `location`.
#[instrument(skip(client, location), fields(location = %location.name))]
pub async fn check_location(
  client: &dyn WeatherKitApi,
  location: &Location,
) -> Result<Availability, Error> {
  let raw = client
    .get_availability(location.latitude, location.longitude)
    .await?;
  let availability = Availability::from_json(&raw);
  debug!("Available data sets: {:?}", availability);

  if !availability.is_usable() {
    return Err(Error::UnsupportedLocation);
  }
  Ok(availability)
}

/// Validates the location and returns a coordinator that already holds data.
#[instrument(skip(client, location), fields(location = %location.name))]
pub async fn setup_coordinator(
  client: Arc<dyn WeatherKitApi>,
  location: Location,
) -> Result<Arc<UpdateCoordinator>, Error> {
  check_location(client.as_ref(), &location).await?;

  let coordinator = Arc::new(UpdateCoordinator::new(client, location));
  coordinator.request_initial_refresh().await?;

  info!("Location set up");
  Ok(coordinator)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::coordinator::CoordinatorState;
  use crate::testing::ScriptedApi;
  use serde_json::json;

  fn home() -> Location {
    Location::new("Home", 51.5, -0.12)
  }

  #[tokio::test]
  async fn usable_location_returns_availability() {
    let api = ScriptedApi::new();
    api.push_availability(Ok(json!(["currentWeather", "forecastDaily", "forecastHourly"])));

    let availability = check_location(&api, &home()).await.unwrap();
    assert!(availability.is_usable());
  }

  #[tokio::test]
  async fn location_without_data_is_unsupported() {
    let api = ScriptedApi::new();
    api.push_availability(Ok(json!([])));

    let err = check_location(&api, &home()).await.unwrap_err();
    assert_eq!(SetupFailure::from_error(&err), SetupFailure::UnsupportedLocation);
  }

  #[tokio::test]
  async fn setup_runs_initial_refresh() {
    let api = Arc::new(ScriptedApi::new());
    api.push_availability(Ok(json!(["currentWeather"])));
    api.push_weather(Ok(json!({"currentWeather": {"temperature": 20.0}})));

    let coordinator = setup_coordinator(api.clone(), home()).await.unwrap();

    assert_eq!(coordinator.state(), CoordinatorState::Ready);
    assert_eq!(api.availability_calls(), 1);
    assert_eq!(api.weather_calls(), 1);
  }

  #[tokio::test]
  async fn setup_failures_are_classified() {
    let cases = [
      (Error::AuthenticationError("Invalid credentials".into()), SetupFailure::Auth),
      (Error::http_status(500), SetupFailure::Connection),
      (Error::communication("dns error"), SetupFailure::Connection),
      (Error::client(std::fmt::Error), SetupFailure::Unknown),
      (Error::ConfigError("Invalid signing key".into()), SetupFailure::Unknown),
    ];

    for (err, expected) in cases {
      let api = Arc::new(ScriptedApi::new());
      api.push_availability(Ok(json!(["currentWeather"])));
      api.push_weather(Err(err));

      let err = match setup_coordinator(api, home()).await {
        Ok(_) => panic!("setup should fail"),
        Err(err) => err,
      };
      assert_eq!(SetupFailure::from_error(&err), expected);
    }
  }

  #[tokio::test]
  async fn availability_failure_skips_weather_request() {
    let api = Arc::new(ScriptedApi::new());
    api.push_availability(Err(Error::AuthenticationError("Invalid credentials".into())));

    let result = setup_coordinator(api.clone(), home()).await;

    assert!(matches!(result, Err(Error::AuthenticationError(_))));
    assert_eq!(api.availability_calls(), 1);
    assert_eq!(api.weather_calls(), 0);
  }
}
