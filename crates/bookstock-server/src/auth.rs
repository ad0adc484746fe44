//! Handlers for `/api/auth` endpoints.

use axum::{Json, extract::State};
use bookstock_core::session::{Credentials, User};
use serde::Serialize;
use serde_json::{Value, json};

use crate::{AppState, error::ApiError};

#[derive(Debug, Serialize)]
pub struct LoginResponse {
  pub success: bool,
  pub user:    User,
  pub token:   String,
}

/// `POST /api/auth/login` — body: `{"username":"...","password":"..."}`
pub async fn login(
  State(state): State<AppState>,
  Json(credentials): Json<Credentials>,
) -> Result<Json<LoginResponse>, ApiError> {
  let session = state.data.write().await.login(&credentials)?;
  tracing::info!(username = %session.user.username, "login");
  Ok(Json(LoginResponse {
    success: true,
    user:    session.user,
    token:   session.token,
  }))
}

/// `POST /api/auth/logout`
pub async fn logout(State(state): State<AppState>) -> Json<Value> {
  state.data.write().await.logout();
  Json(json!({ "success": true }))
}

/// `GET /api/auth/me` — the session user, or `null` when anonymous.
pub async fn me(State(state): State<AppState>) -> Json<Value> {
  let user = state.data.read().await.current_user();
  Json(json!({ "success": true, "user": user }))
}
