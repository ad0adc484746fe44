//! Sort configuration for the store inventory view.
//!
//! Sortable fields form a closed enum with a typed comparator — numeric
//! fields compare numerically, everything else as case-insensitive strings.
//! Callers must pair [`SortKey::compare`] with a stable sort so ties keep
//! their insertion order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::inventory::StoreBook;

// ─── Direction ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
  #[default]
  Asc,
  Desc,
}

// ─── Key ─────────────────────────────────────────────────────────────────────

/// A sortable column of the [`StoreBook`] view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
  Id,
  Title,
  Isbn,
  Language,
  PageCount,
  Format,
  Price,
  AuthorName,
}

impl SortKey {
  /// Compare two view rows under this key, ascending.
  pub fn compare(&self, a: &StoreBook, b: &StoreBook) -> Ordering {
    match self {
      Self::Id => a.book.id.cmp(&b.book.id),
      Self::PageCount => a.book.page_count.cmp(&b.book.page_count),
      Self::Price => a.price.total_cmp(&b.price),
      Self::Title => cmp_ci(&a.book.title, &b.book.title),
      Self::Isbn => cmp_ci(&a.book.isbn, &b.book.isbn),
      Self::Language => cmp_ci(&a.book.language, &b.book.language),
      Self::Format => cmp_ci(a.book.format.as_str(), b.book.format.as_str()),
      Self::AuthorName => cmp_ci(&a.author_name, &b.author_name),
    }
  }
}

fn cmp_ci(a: &str, b: &str) -> Ordering {
  a.to_lowercase().cmp(&b.to_lowercase())
}

// ─── Config ──────────────────────────────────────────────────────────────────

/// The current sort selection: no key means insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
  pub key:       Option<SortKey>,
  pub direction: SortDirection,
}

impl SortConfig {
  /// Select `key`: re-selecting the current ascending key flips to
  /// descending; anything else resets to ascending.
  pub fn toggle(&mut self, key: SortKey) {
    self.direction =
      if self.key == Some(key) && self.direction == SortDirection::Asc {
        SortDirection::Desc
      } else {
        SortDirection::Asc
      };
    self.key = Some(key);
  }

  /// Apply this key/direction to `ascending`, the ordering under the key.
  pub fn apply(&self, ascending: Ordering) -> Ordering {
    match self.direction {
      SortDirection::Asc => ascending,
      SortDirection::Desc => ascending.reverse(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::{Book, BookFormat};

  fn row(id: i64, title: &str, price: f64) -> StoreBook {
    StoreBook {
      book:         Book {
        id,
        author_id: 1,
        title: title.into(),
        isbn: format!("isbn-{id}"),
        language: "English".into(),
        page_count: 100 * id,
        format: BookFormat::Paperback,
      },
      price,
      author_name:  "Ada Lovelace".into(),
      inventory_id: Some(id),
    }
  }

  #[test]
  fn numeric_keys_compare_numerically() {
    let a = row(2, "a", 9.5);
    let b = row(10, "b", 10.0);
    assert_eq!(SortKey::Id.compare(&a, &b), Ordering::Less);
    assert_eq!(SortKey::PageCount.compare(&a, &b), Ordering::Less);
    assert_eq!(SortKey::Price.compare(&a, &b), Ordering::Less);
  }

  #[test]
  fn string_keys_ignore_case() {
    let a = row(1, "zebra", 1.0);
    let b = row(2, "Apple", 1.0);
    assert_eq!(SortKey::Title.compare(&a, &b), Ordering::Greater);
    assert_eq!(SortKey::Title.compare(&b, &a), Ordering::Less);
  }

  #[test]
  fn toggle_flips_then_resets() {
    let mut cfg = SortConfig::default();
    cfg.toggle(SortKey::Price);
    assert_eq!((cfg.key, cfg.direction), (Some(SortKey::Price), SortDirection::Asc));
    cfg.toggle(SortKey::Price);
    assert_eq!(cfg.direction, SortDirection::Desc);
    cfg.toggle(SortKey::Price);
    assert_eq!(cfg.direction, SortDirection::Asc);
    cfg.toggle(SortKey::Price);
    cfg.toggle(SortKey::Title);
    assert_eq!((cfg.key, cfg.direction), (Some(SortKey::Title), SortDirection::Asc));
  }
}
