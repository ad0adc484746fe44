//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("unauthorized: {0}")]
  Unauthorized(String),

  #[error("conflict: {0}")]
  Conflict(String),
}

impl From<bookstock_mock::Error> for ApiError {
  fn from(err: bookstock_mock::Error) -> Self {
    use bookstock_mock::Error as E;

    let message = err.to_string();
    match err {
      E::InvalidCredentials => Self::Unauthorized(message),
      E::AlreadyStocked { .. } => Self::Conflict(message),
      E::BookNotFound(_)
      | E::AuthorNotFound(_)
      | E::StoreNotFound(_)
      | E::InventoryItemNotFound(_)
      | E::BookNotStocked { .. } => Self::NotFound(message),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
