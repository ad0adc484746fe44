//! Development REST server for Bookstock.
//!
//! Serves the canned fixture dataset over the same wire surface a real
//! backend would expose, so the HTTP gateway can be pointed at it during
//! development. State is a shared in-memory [`Dataset`]; nothing persists.

pub mod auth;
pub mod authors;
pub mod books;
pub mod error;
pub mod inventory;
pub mod stores;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post, put},
};
use bookstock_mock::Dataset;
use serde::Deserialize;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── State ───────────────────────────────────────────────────────────────────

/// Shared state: the in-memory dataset every handler reads and writes.
#[derive(Clone)]
pub struct AppState {
  pub data: Arc<RwLock<Dataset>>,
}

impl AppState {
  pub fn new(dataset: Dataset) -> Self {
    Self { data: Arc::new(RwLock::new(dataset)) }
  }

  pub fn seeded() -> Self {
    Self::new(Dataset::seeded())
  }
}

// ─── Config ──────────────────────────────────────────────────────────────────

/// Server settings, deserialised from the config file and `BOOKSTOCK_*`
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host: String,
  #[serde(default = "default_port")]
  pub port: u16,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self { host: default_host(), port: default_port() }
  }
}

fn default_host() -> String {
  "127.0.0.1".to_string()
}

fn default_port() -> u16 {
  3001
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the fully-materialised API router for `state`.
pub fn router(state: AppState) -> Router {
  Router::new()
    // Auth
    .route("/api/auth/login", post(auth::login))
    .route("/api/auth/logout", post(auth::logout))
    .route("/api/auth/me", get(auth::me))
    // Books
    .route("/api/books", get(books::list).post(books::create))
    .route(
      "/api/books/{id}",
      get(books::get_one).put(books::update).delete(books::remove),
    )
    // Authors
    .route("/api/authors", get(authors::list).post(authors::create))
    .route("/api/authors/{id}", get(authors::get_one))
    // Stores
    .route("/api/stores", get(stores::list))
    .route("/api/stores/{id}", get(stores::get_one))
    // Inventory
    .route("/api/inventory", get(inventory::list).post(inventory::create))
    .route(
      "/api/inventory/{id}",
      put(inventory::update_price).delete(inventory::remove_by_id),
    )
    .route("/api/inventory/{id}/books", get(inventory::store_books))
    .route(
      "/api/inventory/store/{store_id}/book/{book_id}",
      delete(inventory::remove_by_pair),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

#[cfg(test)]
mod tests;
