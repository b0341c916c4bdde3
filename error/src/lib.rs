// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use thiserror::Error as ThisError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(ThisError, Debug)]
pub enum Error {
  #[error("Invalid credentials: {0}")]
  AuthenticationError(String),
  #[error("Error fetching information: {message}")]
  CommunicationError {
    message: String,
    status: Option<u16>,
  },
  #[error("Unexpected client error: {0}")]
  ClientError(#[source] BoxError),
  #[error("Configuration error: {0}")]
  ConfigError(String),
  #[error("API does not support this location")]
  UnsupportedLocation,
  #[error("IO error: {0}")]
  IoError(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`], cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  Authentication,
  Communication,
  Client,
  Configuration,
  UnsupportedLocation,
}

impl Error {
  pub fn communication(message: impl Into<String>) -> Self {
    Error::CommunicationError {
      message: message.into(),
      status: None,
    }
  }

  pub fn http_status(status: u16) -> Self {
    Error::CommunicationError {
      message: format!("API request failed with status: {}", status),
      status: Some(status),
    }
  }

  pub fn client<E>(cause: E) -> Self
  where
    E: Into<BoxError>,
  {
    Error::ClientError(cause.into())
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Error::AuthenticationError(_) => ErrorKind::Authentication,
      Error::CommunicationError { .. } => ErrorKind::Communication,
      Error::ClientError(_) => ErrorKind::Client,
      Error::ConfigError(_) | Error::IoError(_) => ErrorKind::Configuration,
      Error::UnsupportedLocation => ErrorKind::UnsupportedLocation,
    }
  }

  /// HTTP status carried by a communication error, if the server answered at all.
  pub fn status(&self) -> Option<u16> {
    match self {
      Error::CommunicationError { status, .. } => *status,
      _ => None,
    }
  }
}
