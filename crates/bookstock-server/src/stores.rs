//! Handlers for `/api/stores` endpoints.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use bookstock_core::{catalog::Store, gateway::StoreQuery};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub search: Option<String>,
}

/// `GET /api/stores[?search=...]`
pub async fn list(
  State(state): State<AppState>,
  Query(params): Query<ListParams>,
) -> Json<Vec<Store>> {
  let query = StoreQuery { search: params.search };
  Json(state.data.read().await.stores(&query))
}

/// `GET /api/stores/{id}`
pub async fn get_one(
  State(state): State<AppState>,
  Path(id): Path<i64>,
) -> Result<Json<Store>, ApiError> {
  let store = state.data.read().await.store(id)?;
  Ok(Json(store))
}
