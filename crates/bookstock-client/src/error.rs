//! Structured error type for the HTTP gateway.

use thiserror::Error;

/// A failed backend call: an optional HTTP status, an optional
/// machine-readable code, and a human-readable message.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
  pub status:  Option<u16>,
  pub code:    Option<String>,
  pub message: String,
}

impl ApiError {
  pub fn new(message: impl Into<String>) -> Self {
    Self { status: None, code: None, message: message.into() }
  }

  /// Only server-side (5xx) failures are worth retrying; client errors and
  /// timeouts are not.
  pub fn is_transient(&self) -> bool {
    self.status.is_some_and(|s| s >= 500)
  }
}

impl From<reqwest::Error> for ApiError {
  fn from(err: reqwest::Error) -> Self {
    if err.is_timeout() {
      Self {
        status:  Some(408),
        code:    Some("TIMEOUT".into()),
        message: "request timeout".into(),
      }
    } else {
      Self {
        status:  err.status().map(|s| s.as_u16()),
        code:    Some("NETWORK_ERROR".into()),
        message: err.to_string(),
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_server_errors_are_transient() {
    let server = ApiError { status: Some(503), code: None, message: "oops".into() };
    let client = ApiError { status: Some(404), code: None, message: "gone".into() };
    let timeout = ApiError {
      status:  Some(408),
      code:    Some("TIMEOUT".into()),
      message: "request timeout".into(),
    };
    let network = ApiError::new("connection refused");

    assert!(server.is_transient());
    assert!(!client.is_transient());
    assert!(!timeout.is_transient());
    assert!(!network.is_transient());
  }
}
