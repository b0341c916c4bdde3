// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{client::WeatherKitApi, config::Location, coordinator::UpdateCoordinator, setup};
use error::Error;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

struct Entry {
  coordinator: Arc<UpdateCoordinator>,
  cancel: CancellationToken,
  task: JoinHandle<()>,
}

impl Entry {
  async fn stop(self) {
    self.cancel.cancel();
    if let Err(e) = self.task.await {
      warn!("Scheduler task ended abnormally: {}", e);
    }
  }
}

/// Owns one coordinator per configured entry, together with its scheduler.
#[derive(Default)]
pub struct CoordinatorRegistry {
  entries: RwLock<HashMap<String, Entry>>,
}

impl CoordinatorRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets up `location` and starts polling it. An existing entry with the same
  /// id is stopped and replaced only after the new one is ready.
  #[instrument(skip(self, client, location), fields(entry_id = %entry_id))]
  pub async fn add_entry(
    &self,
    entry_id: &str,
    client: Arc<dyn WeatherKitApi>,
    location: Location,
  ) -> Result<Arc<UpdateCoordinator>, Error> {
    let coordinator = setup::setup_coordinator(client, location).await?;

    let cancel = CancellationToken::new();
    let task = coordinator.spawn_scheduler(cancel.clone());
    let entry = Entry {
      coordinator: Arc::clone(&coordinator),
      cancel,
      task,
    };

    let previous = self.entries.write().await.insert(entry_id.to_string(), entry);
    if let Some(previous) = previous {
      info!("Replacing existing entry");
      previous.stop().await;
    }

    Ok(coordinator)
  }

  #[instrument(skip(self))]
  pub async fn remove_entry(&self, entry_id: &str) -> bool {
    let removed = self.entries.write().await.remove(entry_id);
    match removed {
      Some(entry) => {
        entry.stop().await;
        info!("Entry removed");
        true
      }
      None => false,
    }
  }

  pub async fn get(&self, entry_id: &str) -> Option<Arc<UpdateCoordinator>> {
    self
      .entries
      .read()
      .await
      .get(entry_id)
      .map(|entry| Arc::clone(&entry.coordinator))
  }

  pub async fn entry_ids(&self) -> Vec<String> {
    let mut ids: Vec<String> = self.entries.read().await.keys().cloned().collect();
    ids.sort();
    ids
  }

  pub async fn len(&self) -> usize {
    self.entries.read().await.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.entries.read().await.is_empty()
  }

  /// Stops every scheduler and drops all coordinators.
  pub async fn shutdown(&self) {
    let entries: Vec<Entry> = self.entries.write().await.drain().map(|(_, e)| e).collect();
    for entry in entries {
      entry.stop().await;
    }
  }
}
