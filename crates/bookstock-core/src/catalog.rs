//! Catalog entities — books, authors, and stores.
//!
//! These are the authoritative records served by the backend. Per-store
//! pricing lives in [`crate::inventory::InventoryItem`]; the catalog itself
//! carries no store-specific data.

use serde::{Deserialize, Serialize};

use crate::Error;

// ─── Book ────────────────────────────────────────────────────────────────────

/// Physical form of a book edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookFormat {
  Paperback,
  Hardcover,
  Ebook,
}

impl BookFormat {
  /// The lowercase discriminant used on the wire and in sort comparisons.
  /// Must match the `rename_all = "lowercase"` serde tags above.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Paperback => "paperback",
      Self::Hardcover => "hardcover",
      Self::Ebook => "ebook",
    }
  }
}

impl std::str::FromStr for BookFormat {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "paperback" => Ok(Self::Paperback),
      "hardcover" => Ok(Self::Hardcover),
      "ebook" => Ok(Self::Ebook),
      other => Err(Error::UnknownFormat(other.to_owned())),
    }
  }
}

/// A catalog book. The wire field for the title is `name`, kept for
/// compatibility with the backend's JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
  pub id:         i64,
  pub author_id:  i64,
  #[serde(rename = "name")]
  pub title:      String,
  pub isbn:       String,
  pub language:   String,
  pub page_count: i64,
  pub format:     BookFormat,
}

// ─── Author ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
  pub id:         i64,
  pub first_name: String,
  pub last_name:  String,
}

impl Author {
  /// "first last" display form used everywhere an author is shown.
  pub fn display_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
  pub id:      i64,
  pub name:    String,
  pub address: String,
}
