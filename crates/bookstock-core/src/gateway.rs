//! The `Gateway` trait and supporting query types.
//!
//! The trait is implemented by data backends (`bookstock-client` over HTTP,
//! `bookstock-mock` over an in-process fixture dataset). Higher layers
//! (`bookstock-engine`, `bookstock-cli`) depend on this abstraction, not on
//! any concrete backend — swapping the mock in for development is a
//! configuration choice, never a code path.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{
  catalog::{Author, Book, BookFormat, Store},
  inventory::{InventoryItem, StoreBook},
  session::{AuthSession, Credentials, User},
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Parameters for [`Gateway::books`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookQuery {
  /// Free-text filter over book titles.
  pub search:   Option<String>,
  /// Restrict to books stocked by a specific store.
  pub store_id: Option<i64>,
}

/// Parameters for [`Gateway::authors`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorQuery {
  /// Free-text filter over "first last" display names.
  pub search: Option<String>,
}

/// Parameters for [`Gateway::stores`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreQuery {
  /// Free-text filter over store names.
  pub search: Option<String>,
}

/// Parameters for [`Gateway::inventory`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryQuery {
  pub store_id: Option<i64>,
}

// ─── Write inputs ────────────────────────────────────────────────────────────

/// Input to [`Gateway::create_book`]. The backend assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
  pub author_id:  i64,
  #[serde(rename = "name")]
  pub title:      String,
  pub isbn:       String,
  pub language:   String,
  pub page_count: i64,
  pub format:     BookFormat,
}

/// Partial update for [`Gateway::update_book`]. Absent fields are left
/// unchanged by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub author_id:  Option<i64>,
  #[serde(rename = "name", skip_serializing_if = "Option::is_none")]
  pub title:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub isbn:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub language:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub page_count: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub format:     Option<BookFormat>,
}

/// Input to [`Gateway::create_author`]. The backend assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAuthor {
  pub first_name: String,
  pub last_name:  String,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Bookstock data backend.
///
/// Every call resolves to the requested value or a structured failure
/// carrying a human-readable message (and, for HTTP backends, an optional
/// status and machine-readable code). Callers treat any failure uniformly
/// as "operation failed" unless they classify it for retry.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait Gateway: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Books ─────────────────────────────────────────────────────────────

  /// List catalog books, optionally filtered.
  fn books(
    &self,
    query: BookQuery,
  ) -> impl Future<Output = Result<Vec<Book>, Self::Error>> + Send + '_;

  /// Fetch a single book. Fails if the id is unknown.
  fn book(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Book, Self::Error>> + Send + '_;

  fn create_book(
    &self,
    book: NewBook,
  ) -> impl Future<Output = Result<Book, Self::Error>> + Send + '_;

  fn update_book(
    &self,
    id: i64,
    patch: BookPatch,
  ) -> impl Future<Output = Result<Book, Self::Error>> + Send + '_;

  fn delete_book(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Authors ───────────────────────────────────────────────────────────

  fn authors(
    &self,
    query: AuthorQuery,
  ) -> impl Future<Output = Result<Vec<Author>, Self::Error>> + Send + '_;

  fn author(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Author, Self::Error>> + Send + '_;

  fn create_author(
    &self,
    author: NewAuthor,
  ) -> impl Future<Output = Result<Author, Self::Error>> + Send + '_;

  // ── Stores ────────────────────────────────────────────────────────────

  fn stores(
    &self,
    query: StoreQuery,
  ) -> impl Future<Output = Result<Vec<Store>, Self::Error>> + Send + '_;

  fn store(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Store, Self::Error>> + Send + '_;

  // ── Inventory ─────────────────────────────────────────────────────────

  /// List raw inventory rows, optionally restricted to one store.
  fn inventory(
    &self,
    query: InventoryQuery,
  ) -> impl Future<Output = Result<Vec<InventoryItem>, Self::Error>> + Send + '_;

  /// The denormalized view of books priced in `store_id`: catalog fields
  /// joined with price, author display name, and the inventory row id.
  fn store_books(
    &self,
    store_id: i64,
  ) -> impl Future<Output = Result<Vec<StoreBook>, Self::Error>> + Send + '_;

  /// Price `book_id` in `store_id`. Fails if the pair is already stocked.
  fn add_inventory_item(
    &self,
    store_id: i64,
    book_id: i64,
    price: f64,
  ) -> impl Future<Output = Result<InventoryItem, Self::Error>> + Send + '_;

  /// Reprice the inventory row `inventory_id`.
  fn update_inventory_price(
    &self,
    inventory_id: i64,
    price: f64,
  ) -> impl Future<Output = Result<InventoryItem, Self::Error>> + Send + '_;

  /// Remove `book_id` from `store_id`'s inventory.
  fn remove_inventory_item(
    &self,
    store_id: i64,
    book_id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Auth ──────────────────────────────────────────────────────────────

  fn login(
    &self,
    credentials: Credentials,
  ) -> impl Future<Output = Result<AuthSession, Self::Error>> + Send + '_;

  fn logout(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// The user bound to the backend session, if any.
  fn current_user(
    &self,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;
}
