// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  client::WeatherKitApi, config::Location, constants::UPDATE_INTERVAL, models::WeatherSnapshot,
};
use chrono::{DateTime, Utc};
use error::{Error, ErrorKind};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
  Uninitialized,
  Refreshing,
  Ready,
  Failed,
}

/// Why the most recent poll failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
  /// Credentials were rejected; the user has to re-authenticate.
  AuthFailed(String),
  /// Transient or unexpected failure; the next tick retries.
  UpdateFailed(String),
  /// The signing key is unusable; scheduled polling stops.
  InvalidConfiguration(String),
}

impl FailureKind {
  pub fn from_error(err: &Error) -> Self {
    match err.kind() {
      ErrorKind::Authentication => FailureKind::AuthFailed(err.to_string()),
      ErrorKind::Configuration => FailureKind::InvalidConfiguration(err.to_string()),
      _ => FailureKind::UpdateFailed(err.to_string()),
    }
  }

  pub fn message(&self) -> &str {
    match self {
      FailureKind::AuthFailed(message)
      | FailureKind::UpdateFailed(message)
      | FailureKind::InvalidConfiguration(message) => message,
    }
  }
}

impl std::fmt::Display for FailureKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      FailureKind::AuthFailed(message) => write!(f, "auth failed: {}", message),
      FailureKind::UpdateFailed(message) => write!(f, "update failed: {}", message),
      FailureKind::InvalidConfiguration(message) => write!(f, "invalid configuration: {}", message),
    }
  }
}

/// Everything a consumer can observe, published as one value per poll.
#[derive(Debug, Clone)]
pub struct CoordinatorStatus {
  pub state: CoordinatorState,
  pub snapshot: Option<Arc<WeatherSnapshot>>,
  pub last_error: Option<FailureKind>,
  pub last_updated: Option<DateTime<Utc>>,
}

impl Default for CoordinatorStatus {
  fn default() -> Self {
    Self {
      state: CoordinatorState::Uninitialized,
      snapshot: None,
      last_error: None,
      last_updated: None,
    }
  }
}

pub struct UpdateCoordinator {
  client: Arc<dyn WeatherKitApi>,
  location: Location,
  update_interval: Duration,
  poll_lock: Mutex<()>,
  status: watch::Sender<CoordinatorStatus>,
}

impl UpdateCoordinator {
  pub fn new(client: Arc<dyn WeatherKitApi>, location: Location) -> Self {
    let (status, _) = watch::channel(CoordinatorStatus::default());
    Self {
      client,
      location,
      update_interval: UPDATE_INTERVAL,
      poll_lock: Mutex::new(()),
      status,
    }
  }

  pub fn location(&self) -> &Location {
    &self.location
  }

  pub fn update_interval(&self) -> Duration {
    self.update_interval
  }

  /// Runs the first poll and hands its failure back to the caller.
  pub async fn request_initial_refresh(&self) -> Result<(), Error> {
    self.poll().await
  }

  /// One scheduled poll. Failures stay inside the coordinator.
  pub async fn on_tick(&self) {
    let _ = self.poll().await;
  }

  /// On-demand poll; returns the state it left the coordinator in.
  pub async fn request_refresh(&self) -> CoordinatorState {
    let _ = self.poll().await;
    self.state()
  }

  pub fn current_snapshot(&self) -> Option<Arc<WeatherSnapshot>> {
    self.status.borrow().snapshot.clone()
  }

  pub fn last_error(&self) -> Option<FailureKind> {
    self.status.borrow().last_error.clone()
  }

  pub fn state(&self) -> CoordinatorState {
    self.status.borrow().state
  }

  pub fn last_updated(&self) -> Option<DateTime<Utc>> {
    self.status.borrow().last_updated
  }

  pub fn status(&self) -> CoordinatorStatus {
    self.status.borrow().clone()
  }

  pub fn subscribe(&self) -> watch::Receiver<CoordinatorStatus> {
    self.status.subscribe()
  }

  /// Starts the fixed-interval scheduler. The first tick fires one interval from now.
  pub fn spawn_scheduler(self: &Arc<Self>, cancel: CancellationToken) -> JoinHandle<()> {
    let coordinator = Arc::clone(self);

    tokio::spawn(async move {
      let period = coordinator.update_interval();
      let mut interval = interval_at(Instant::now() + period, period);
      interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
      info!("Scheduled updates started for {}", coordinator.location.name);

      loop {
        tokio::select! {
          () = cancel.cancelled() => {
            info!("Scheduled updates stopped for {}", coordinator.location.name);
            break;
          }
          _ = interval.tick() => {
            coordinator.on_tick().await;
            if let Some(FailureKind::InvalidConfiguration(_)) = coordinator.last_error() {
              error!(
                "Scheduled updates disabled for {}: signing key is invalid",
                coordinator.location.name
              );
              break;
            }
          }
        }
      }
    })
  }

  #[instrument(skip(self), fields(location = %self.location.name))]
  async fn poll(&self) -> Result<(), Error> {
    let _guard = self.poll_lock.lock().await;

    // Readers see Refreshing, subscribers are only woken once the poll resolves.
    self.status.send_if_modified(|status| {
      status.state = CoordinatorState::Refreshing;
      false
    });

    let result = self
      .client
      .get_current_and_daily_forecast(
        self.location.latitude,
        self.location.longitude,
        &self.location.language,
      )
      .await;

    match result {
      Ok(payload) => {
        let snapshot = Arc::new(WeatherSnapshot::new(payload));
        self.status.send_modify(|status| {
          status.state = CoordinatorState::Ready;
          status.snapshot = Some(snapshot);
          status.last_error = None;
          status.last_updated = Some(Utc::now());
        });
        debug!("Weather data updated");
        Ok(())
      }
      Err(e) => {
        let failure = FailureKind::from_error(&e);
        match &failure {
          FailureKind::AuthFailed(_) => {
            warn!("Credentials rejected, re-authentication required: {}", e)
          }
          FailureKind::InvalidConfiguration(_) => error!("Cannot sign requests: {}", e),
          FailureKind::UpdateFailed(_) => warn!("Weather update failed: {}", e),
        }
        self.status.send_modify(|status| {
          status.state = CoordinatorState::Failed;
          status.last_error = Some(failure);
        });
        Err(e)
      }
    }
  }
}
