//! Handlers for `/api/inventory` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/api/inventory` | Optional `?storeId=...` |
//! | `POST`   | `/api/inventory` | 409 if the pair is already stocked |
//! | `PUT`    | `/api/inventory/{id}` | Reprice one row |
//! | `DELETE` | `/api/inventory/{id}` | |
//! | `GET`    | `/api/inventory/{id}/books` | Denormalized store view |
//! | `DELETE` | `/api/inventory/store/{store_id}/book/{book_id}` | |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use bookstock_core::{
  gateway::InventoryQuery,
  inventory::{InventoryItem, StoreBook},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  #[serde(rename = "storeId")]
  pub store_id: Option<i64>,
}

/// `GET /api/inventory[?storeId=...]`
pub async fn list(
  State(state): State<AppState>,
  Query(params): Query<ListParams>,
) -> Json<Vec<InventoryItem>> {
  let query = InventoryQuery { store_id: params.store_id };
  Json(state.data.read().await.inventory(&query))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub store_id: i64,
  pub book_id:  i64,
  pub price:    f64,
}

/// `POST /api/inventory`
pub async fn create(
  State(state): State<AppState>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError> {
  check_price(body.price)?;
  let item = state
    .data
    .write()
    .await
    .add_inventory_item(body.store_id, body.book_id, body.price)?;
  Ok((StatusCode::CREATED, Json(item)))
}

#[derive(Debug, Deserialize)]
pub struct PriceBody {
  pub price: f64,
}

/// `PUT /api/inventory/{id}`
pub async fn update_price(
  State(state): State<AppState>,
  Path(id): Path<i64>,
  Json(body): Json<PriceBody>,
) -> Result<Json<InventoryItem>, ApiError> {
  check_price(body.price)?;
  let item = state.data.write().await.update_inventory_price(id, body.price)?;
  Ok(Json(item))
}

/// `DELETE /api/inventory/{id}`
pub async fn remove_by_id(
  State(state): State<AppState>,
  Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
  state.data.write().await.remove_inventory_item_by_id(id)?;
  Ok(Json(json!({ "success": true })))
}

/// `GET /api/inventory/{id}/books` — the denormalized view for store `id`.
pub async fn store_books(
  State(state): State<AppState>,
  Path(id): Path<i64>,
) -> Json<Vec<StoreBook>> {
  Json(state.data.read().await.store_books(id))
}

/// `DELETE /api/inventory/store/{store_id}/book/{book_id}`
pub async fn remove_by_pair(
  State(state): State<AppState>,
  Path((store_id, book_id)): Path<(i64, i64)>,
) -> Result<Json<Value>, ApiError> {
  state.data.write().await.remove_inventory_item(store_id, book_id)?;
  Ok(Json(json!({ "success": true })))
}

fn check_price(price: f64) -> Result<(), ApiError> {
  if !price.is_finite() || price < 0.0 {
    return Err(ApiError::BadRequest(format!("invalid price: {price}")));
  }
  Ok(())
}
