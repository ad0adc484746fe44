//! Handlers for `/api/books` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/api/books` | Optional `?search=...&storeId=...` |
//! | `POST`   | `/api/books` | 201 with the assigned id |
//! | `GET`    | `/api/books/{id}` | 404 if not found |
//! | `PUT`    | `/api/books/{id}` | Partial update |
//! | `DELETE` | `/api/books/{id}` | |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use bookstock_core::{
  catalog::Book,
  gateway::{BookPatch, BookQuery, NewBook},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub search:   Option<String>,
  #[serde(rename = "storeId")]
  pub store_id: Option<i64>,
}

/// `GET /api/books[?search=...][&storeId=...]`
pub async fn list(
  State(state): State<AppState>,
  Query(params): Query<ListParams>,
) -> Json<Vec<Book>> {
  let query = BookQuery { search: params.search, store_id: params.store_id };
  Json(state.data.read().await.books(&query))
}

/// `POST /api/books`
pub async fn create(
  State(state): State<AppState>,
  Json(body): Json<NewBook>,
) -> impl IntoResponse {
  let book = state.data.write().await.create_book(body);
  (StatusCode::CREATED, Json(book))
}

/// `GET /api/books/{id}`
pub async fn get_one(
  State(state): State<AppState>,
  Path(id): Path<i64>,
) -> Result<Json<Book>, ApiError> {
  let book = state.data.read().await.book(id)?;
  Ok(Json(book))
}

/// `PUT /api/books/{id}`
pub async fn update(
  State(state): State<AppState>,
  Path(id): Path<i64>,
  Json(patch): Json<BookPatch>,
) -> Result<Json<Book>, ApiError> {
  let book = state.data.write().await.update_book(id, patch)?;
  Ok(Json(book))
}

/// `DELETE /api/books/{id}`
pub async fn remove(
  State(state): State<AppState>,
  Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
  state.data.write().await.delete_book(id)?;
  Ok(Json(json!({ "success": true })))
}
