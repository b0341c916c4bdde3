// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use anyhow::{bail, Context, Result};
use config::Config;
use std::{env, sync::Arc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};
use weather::{
  constants::ATTRIBUTION, CoordinatorRegistry, CoordinatorState, CoordinatorStatus, Credentials,
  FailureKind, Location, SetupFailure, UpdateCoordinator, WeatherKitClient,
};

const CONFIG_ENV: &str = "WEATHERKIT_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "weatherkit.toml";

#[cfg(debug_assertions)]
fn setup_logging() {
  tracing_subscriber::fmt()
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .init();
}

#[cfg(not(debug_assertions))]
fn setup_logging() {
  tracing_subscriber::fmt().init();
}

#[tokio::main]
async fn main() -> Result<()> {
  setup_logging();

  let config_path = env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
  let config = Config::from_file(&config_path)
    .with_context(|| format!("Failed to load config from {}", config_path))?;

  let registry = CoordinatorRegistry::new();
  let consumers = CancellationToken::new();
  let mut tasks = Vec::new();

  for coordinator in register_locations(&config, &registry).await? {
    tasks.push(spawn_consumer(coordinator, consumers.clone()));
  }

  tokio::signal::ctrl_c()
    .await
    .context("Failed to listen for Ctrl-C")?;
  info!("Shutting down");

  registry.shutdown().await;
  consumers.cancel();
  for task in tasks {
    if let Err(e) = task.await {
      warn!("Consumer task ended abnormally: {}", e);
    }
  }

  Ok(())
}

#[instrument(skip_all)]
async fn register_locations(
  config: &Config,
  registry: &CoordinatorRegistry,
) -> Result<Vec<Arc<UpdateCoordinator>>> {
  let key_pem = config
    .credentials
    .key_pem()
    .context("Failed to read signing key")?;
  let credentials = Credentials::new(
    config.credentials.key_id.clone(),
    config.credentials.service_id.clone(),
    config.credentials.team_id.clone(),
    key_pem,
  );

  let mut coordinators = Vec::new();
  for entry in &config.locations {
    let location = Location::new(entry.name.clone(), entry.latitude, entry.longitude)
      .with_language(entry.language.clone());

    let mut builder = WeatherKitClient::builder().credentials(credentials.clone());
    if let Some(base_url) = &config.api.base_url {
      builder = builder.base_url(base_url.clone());
    }
    let client = builder
      .build()
      .context("Failed to create WeatherKit client")?;

    let entry_id = location.unique_id();
    match registry.add_entry(&entry_id, Arc::new(client), location).await {
      Ok(coordinator) => {
        info!(
          "Tracking weather for {} every {} min",
          entry.name,
          coordinator.update_interval().as_secs() / 60
        );
        coordinators.push(coordinator);
      }
      Err(e) => {
        error!("{}: {} ({})", entry.name, SetupFailure::from_error(&e), e);
      }
    }
  }

  if coordinators.is_empty() {
    bail!("No location could be set up");
  }
  info!("{}", ATTRIBUTION);
  Ok(coordinators)
}

fn spawn_consumer(coordinator: Arc<UpdateCoordinator>, cancel: CancellationToken) -> JoinHandle<()> {
  let mut updates = coordinator.subscribe();
  let name = coordinator.location().name.clone();
  log_status(&name, &coordinator.status());

  tokio::spawn(async move {
    loop {
      tokio::select! {
        () = cancel.cancelled() => break,
        changed = updates.changed() => {
          if changed.is_err() {
            break;
          }
          let status = updates.borrow_and_update().clone();
          log_status(&name, &status);
        }
      }
    }
  })
}

fn log_status(name: &str, status: &CoordinatorStatus) {
  if status.state == CoordinatorState::Failed {
    match &status.last_error {
      Some(FailureKind::AuthFailed(message)) => {
        warn!("{}: credentials rejected, re-authentication required ({})", name, message)
      }
      Some(failure) => warn!("{}: update failed ({})", name, failure.message()),
      None => {}
    }
    return;
  }

  let Some(current) = status.snapshot.as_ref().and_then(|s| s.current()) else {
    return;
  };
  let condition = current
    .condition()
    .map_or_else(|| "unknown".to_string(), |c| c.to_string());
  let temperature = current
    .temperature()
    .map_or_else(|| "N/A".to_string(), |t| format!("{:.1}°C", t));
  let humidity = current
    .humidity()
    .map_or_else(|| "N/A".to_string(), |h| format!("{:.0}%", h));

  info!(
    "{}: {}, {}, humidity {}",
    name, condition, temperature, humidity
  );
}
