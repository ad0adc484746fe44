//! Inventory records and the denormalized per-store views.
//!
//! [`InventoryItem`] is the authoritative price record. [`StoreBook`] and
//! [`AvailableBook`] are derived views — assembled on read, never stored.

use serde::{Deserialize, Serialize};

use crate::catalog::Book;

/// Sentinel author name used when a book's `author_id` resolves to no
/// catalog author.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

// ─── InventoryItem ───────────────────────────────────────────────────────────

/// One priced book in one store. `(store_id, book_id)` is unique per store —
/// a book appears at most once in a store's inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
  pub id:       i64,
  pub store_id: i64,
  pub book_id:  i64,
  pub price:    f64,
}

// ─── Derived views ───────────────────────────────────────────────────────────

/// A book as priced in a specific store: the catalog record joined with its
/// inventory row and a resolved author display name.
///
/// `inventory_id` routes later price updates to the right inventory row. A
/// backend that omits it yields `None`, which price mutations reject rather
/// than guess around.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreBook {
  #[serde(flatten)]
  pub book:         Book,
  pub price:        f64,
  pub author_name:  String,
  #[serde(default)]
  pub inventory_id: Option<i64>,
}

/// A catalog book not yet priced in the current store, annotated with its
/// resolved author display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableBook {
  #[serde(flatten)]
  pub book:        Book,
  pub author_name: String,
}
