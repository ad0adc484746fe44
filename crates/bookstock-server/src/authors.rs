//! Handlers for `/api/authors` endpoints.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use bookstock_core::{
  catalog::Author,
  gateway::{AuthorQuery, NewAuthor},
};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub search: Option<String>,
}

/// `GET /api/authors[?search=...]` — search matches "first last" names.
pub async fn list(
  State(state): State<AppState>,
  Query(params): Query<ListParams>,
) -> Json<Vec<Author>> {
  let query = AuthorQuery { search: params.search };
  Json(state.data.read().await.authors(&query))
}

/// `POST /api/authors`
pub async fn create(
  State(state): State<AppState>,
  Json(body): Json<NewAuthor>,
) -> impl IntoResponse {
  let author = state.data.write().await.create_author(body);
  (StatusCode::CREATED, Json(author))
}

/// `GET /api/authors/{id}`
pub async fn get_one(
  State(state): State<AppState>,
  Path(id): Path<i64>,
) -> Result<Json<Author>, ApiError> {
  let author = state.data.read().await.author(id)?;
  Ok(Json(author))
}
