//! [`InventoryEngine`] — state, loading, derived views, and mutations.

use std::{
  collections::{HashMap, HashSet},
  sync::Arc,
};

use bookstock_core::{
  catalog::{Author, Book},
  gateway::{AuthorQuery, BookQuery, Gateway},
  inventory::{AvailableBook, StoreBook, UNKNOWN_AUTHOR},
  sort::{SortConfig, SortKey},
};

use crate::EngineError;

// ─── Load plumbing ───────────────────────────────────────────────────────────

/// The three collections a load fetches before the view is replaced.
#[derive(Debug, Clone)]
pub struct LoadData {
  pub store_books: Vec<StoreBook>,
  pub books:       Vec<Book>,
  pub authors:     Vec<Author>,
}

/// Handle returned by [`InventoryEngine::begin_load`]; pairs a fetch with
/// the load generation it belongs to.
#[derive(Debug, Clone, Copy)]
#[must_use = "a load is only applied by passing its ticket to complete_load"]
pub struct LoadTicket {
  store_id:   i64,
  generation: u64,
}

impl LoadTicket {
  pub fn store_id(&self) -> i64 {
    self.store_id
  }
}

/// What [`InventoryEngine::complete_load`] did with a fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
  /// The view was replaced with the fetched data.
  Applied,
  /// The fetch failed; the error was recorded and previous data kept.
  Failed,
  /// A newer load had already started; the response was dropped.
  Discarded,
}

/// Lifecycle of the store-scoped view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  Idle,
  Loading,
  Ready,
  Errored,
}

/// Fetch the three collections for `store_id` concurrently. Any single
/// failure fails the whole load — there is no partial-success state.
pub async fn fetch<G: Gateway>(
  gateway: &G,
  store_id: i64,
) -> Result<LoadData, G::Error> {
  let (store_books, books, authors) = tokio::try_join!(
    gateway.store_books(store_id),
    gateway.books(BookQuery::default()),
    gateway.authors(AuthorQuery::default()),
  )?;
  Ok(LoadData { store_books, books, authors })
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// The state-owning inventory component for one store at a time.
///
/// All mutation goes through `&mut self`, so the view is exclusively owned
/// here and read-only everywhere else. Derived views ([`Self::books`],
/// [`Self::available_books`], [`Self::author_map`]) are pure functions of
/// the state, recomputed on demand.
pub struct InventoryEngine<G> {
  gateway: Arc<G>,

  store_id:  Option<i64>,
  books:     Vec<StoreBook>,
  all_books: Vec<Book>,
  authors:   Vec<Author>,

  loading:     bool,
  error:       Option<String>,
  search_term: String,
  sort:        SortConfig,

  /// Bumped by every `begin_load`; completions for older generations are
  /// discarded so a stale response can never overwrite newer data.
  generation: u64,
}

impl<G: Gateway> InventoryEngine<G> {
  pub fn new(gateway: Arc<G>) -> Self {
    Self {
      gateway,
      store_id: None,
      books: Vec::new(),
      all_books: Vec::new(),
      authors: Vec::new(),
      loading: false,
      error: None,
      search_term: String::new(),
      sort: SortConfig::default(),
      generation: 0,
    }
  }

  // ── Loading ───────────────────────────────────────────────────────────────

  /// Mark `store_id` as the current store and start a new load generation.
  pub fn begin_load(&mut self, store_id: i64) -> LoadTicket {
    self.generation = self.generation.wrapping_add(1);
    self.loading = true;
    self.error = None;
    self.store_id = Some(store_id);
    LoadTicket { store_id, generation: self.generation }
  }

  /// Apply a fetch result for `ticket`. Responses whose generation is no
  /// longer current are dropped without touching state.
  pub fn complete_load(
    &mut self,
    ticket: LoadTicket,
    result: Result<LoadData, G::Error>,
  ) -> LoadOutcome {
    if ticket.generation != self.generation {
      tracing::debug!(
        store_id = ticket.store_id,
        "discarding superseded load response"
      );
      return LoadOutcome::Discarded;
    }

    match result {
      Ok(data) => {
        self.books = data.store_books;
        self.all_books = data.books;
        self.authors = data.authors;
        self.loading = false;
        self.error = None;
        LoadOutcome::Applied
      }
      Err(e) => {
        // Keep the previous data: stale-but-available beats empty.
        tracing::warn!(store_id = ticket.store_id, error = %e, "inventory load failed");
        self.error = Some(e.to_string());
        self.loading = false;
        LoadOutcome::Failed
      }
    }
  }

  /// Fetch and apply in one step.
  pub async fn load(&mut self, store_id: i64) -> LoadOutcome {
    let ticket = self.begin_load(store_id);
    let gateway = Arc::clone(&self.gateway);
    let result = fetch(gateway.as_ref(), store_id).await;
    self.complete_load(ticket, result)
  }

  // ── State accessors ───────────────────────────────────────────────────────

  pub fn phase(&self) -> Phase {
    if self.loading {
      Phase::Loading
    } else if self.error.is_some() {
      Phase::Errored
    } else if self.store_id.is_none() {
      Phase::Idle
    } else {
      Phase::Ready
    }
  }

  pub fn store_id(&self) -> Option<i64> {
    self.store_id
  }

  pub fn is_loading(&self) -> bool {
    self.loading
  }

  pub fn error(&self) -> Option<&str> {
    self.error.as_deref()
  }

  pub fn search_term(&self) -> &str {
    &self.search_term
  }

  pub fn sort(&self) -> SortConfig {
    self.sort
  }

  /// The full catalog as of the last successful load.
  pub fn catalog(&self) -> &[Book] {
    &self.all_books
  }

  pub fn authors(&self) -> &[Author] {
    &self.authors
  }

  // ── Derived views ─────────────────────────────────────────────────────────

  /// Author id → "first last" display name.
  pub fn author_map(&self) -> HashMap<i64, String> {
    self
      .authors
      .iter()
      .map(|a| (a.id, a.display_name()))
      .collect()
  }

  /// The store view, filtered by the search term and ordered by the sort
  /// config. The sort is stable, so ties keep their insertion order.
  pub fn books(&self) -> Vec<&StoreBook> {
    let term = self.search_term.trim().to_lowercase();

    let mut rows: Vec<&StoreBook> = if term.is_empty() {
      self.books.iter().collect()
    } else {
      self
        .books
        .iter()
        .filter(|b| {
          b.book.title.to_lowercase().contains(&term)
            || b.author_name.to_lowercase().contains(&term)
            || b.book.id.to_string().contains(&term)
        })
        .collect()
    };

    if let Some(key) = self.sort.key {
      rows.sort_by(|a, b| self.sort.apply(key.compare(a, b)));
    }

    rows
  }

  /// Catalog books not yet stocked in the current store, each annotated
  /// with a resolved author display name.
  pub fn available_books(&self) -> Vec<AvailableBook> {
    let stocked: HashSet<i64> = self.books.iter().map(|b| b.book.id).collect();
    let authors = self.author_map();

    self
      .all_books
      .iter()
      .filter(|b| !stocked.contains(&b.id))
      .map(|b| AvailableBook {
        book:        b.clone(),
        author_name: authors
          .get(&b.author_id)
          .cloned()
          .unwrap_or_else(|| UNKNOWN_AUTHOR.to_owned()),
      })
      .collect()
  }

  // ── View setters ──────────────────────────────────────────────────────────

  pub fn set_search_term(&mut self, term: impl Into<String>) {
    self.search_term = term.into();
  }

  /// Select a sort column; re-selecting the current one toggles direction.
  pub fn handle_sort(&mut self, key: SortKey) {
    self.sort.toggle(key);
  }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// Price `book_id` in the current store, then refetch the store view
  /// wholesale so the new row carries its backend-assigned inventory id.
  pub async fn add_book(&mut self, book_id: i64, price: f64) -> Result<(), EngineError> {
    let store_id = self.store_id.ok_or(EngineError::NoStoreLoaded)?;

    self
      .gateway
      .add_inventory_item(store_id, book_id, price)
      .await
      .map_err(EngineError::gateway)?;

    let view = self
      .gateway
      .store_books(store_id)
      .await
      .map_err(EngineError::gateway)?;
    self.books = view;
    Ok(())
  }

  /// Reprice `book_id` in the current store. The inventory id is resolved
  /// against the freshest loaded view; the gateway write must succeed, and
  /// the local row is then patched with the price the gateway confirmed.
  pub async fn update_price(
    &mut self,
    book_id: i64,
    new_price: f64,
  ) -> Result<(), EngineError> {
    self.store_id.ok_or(EngineError::NoStoreLoaded)?;

    let inventory_id = {
      let entry = self
        .books
        .iter()
        .find(|b| b.book.id == book_id)
        .ok_or(EngineError::NotInInventory(book_id))?;
      entry
        .inventory_id
        .ok_or(EngineError::MissingInventoryId(book_id))?
    };

    let updated = self
      .gateway
      .update_inventory_price(inventory_id, new_price)
      .await
      .map_err(EngineError::gateway)?;

    if let Some(entry) = self.books.iter_mut().find(|b| b.book.id == book_id) {
      entry.price = updated.price;
    }
    Ok(())
  }

  /// Remove `book_id` from the current store. The row is dropped locally
  /// only after the gateway delete succeeds — a failed removal stays
  /// visible.
  pub async fn remove_book(&mut self, book_id: i64) -> Result<(), EngineError> {
    let store_id = self.store_id.ok_or(EngineError::NoStoreLoaded)?;

    self
      .gateway
      .remove_inventory_item(store_id, book_id)
      .await
      .map_err(EngineError::gateway)?;

    self.books.retain(|b| b.book.id != book_id);
    Ok(())
  }
}
