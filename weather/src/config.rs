// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::constants::DEFAULT_LANGUAGE;
use std::sync::Arc;

/// Long-lived signing identity. Cloning shares the same key material.
#[derive(Clone)]
pub struct Credentials {
  inner: Arc<CredentialsInner>,
}

struct CredentialsInner {
  key_id: String,
  service_id: String,
  team_id: String,
  key_pem: String,
}

impl Credentials {
  pub fn new(
    key_id: impl Into<String>,
    service_id: impl Into<String>,
    team_id: impl Into<String>,
    key_pem: impl Into<String>,
  ) -> Self {
    Self {
      inner: Arc::new(CredentialsInner {
        key_id: key_id.into(),
        service_id: service_id.into(),
        team_id: team_id.into(),
        key_pem: key_pem.into(),
      }),
    }
  }

  pub fn key_id(&self) -> &str {
    &self.inner.key_id
  }

  pub fn service_id(&self) -> &str {
    &self.inner.service_id
  }

  pub fn team_id(&self) -> &str {
    &self.inner.team_id
  }

  pub(crate) fn key_pem(&self) -> &str {
    &self.inner.key_pem
  }
}

impl std::fmt::Debug for Credentials {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Credentials")
      .field("key_id", &self.inner.key_id)
      .field("service_id", &self.inner.service_id)
      .field("team_id", &self.inner.team_id)
      .finish_non_exhaustive()
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
  pub name: String,
  pub latitude: f64,
  pub longitude: f64,
  pub language: String,
}

impl Location {
  pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
    Self {
      name: name.into(),
      latitude,
      longitude,
      language: DEFAULT_LANGUAGE.to_string(),
    }
  }

  pub fn with_language(mut self, language: impl Into<String>) -> Self {
    self.language = language.into();
    self
  }

  /// Stable identifier derived from the coordinates.
  pub fn unique_id(&self) -> String {
    format!("{}-{}", self.latitude, self.longitude)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn location_defaults_to_en_us() {
    let location = Location::new("Home", 51.5, -0.12);
    assert_eq!(location.language, "en-US");
    assert_eq!(location.unique_id(), "51.5--0.12");

    let location = location.with_language("fr-FR");
    assert_eq!(location.language, "fr-FR");
  }

  #[test]
  fn credentials_debug_hides_key() {
    let credentials = Credentials::new("KID", "svc", "team", "super secret pem");
    let printed = format!("{:?}", credentials);
    assert!(printed.contains("KID"));
    assert!(!printed.contains("super secret pem"));
  }
}
