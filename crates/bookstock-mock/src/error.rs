//! Error type for `bookstock-mock`.
//!
//! Variants mirror the failures a REST backend would report; the dev server
//! maps them onto HTTP status codes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("book {0} not found")]
  BookNotFound(i64),

  #[error("author {0} not found")]
  AuthorNotFound(i64),

  #[error("store {0} not found")]
  StoreNotFound(i64),

  #[error("inventory item {0} not found")]
  InventoryItemNotFound(i64),

  #[error("book {book_id} not found in store {store_id} inventory")]
  BookNotStocked { store_id: i64, book_id: i64 },

  #[error("book {book_id} is already stocked in store {store_id}")]
  AlreadyStocked { store_id: i64, book_id: i64 },

  #[error("invalid credentials")]
  InvalidCredentials,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
