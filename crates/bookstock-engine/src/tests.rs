//! Engine tests against the in-process mock gateway.

use std::sync::{
  Arc,
  atomic::{AtomicBool, Ordering},
};

use bookstock_core::{
  catalog::{Author, Book, BookFormat, Store},
  gateway::{
    AuthorQuery, BookPatch, BookQuery, Gateway, InventoryQuery, NewAuthor,
    NewBook, StoreQuery,
  },
  inventory::{InventoryItem, StoreBook, UNKNOWN_AUTHOR},
  session::{AuthSession, Credentials, User},
  sort::{SortDirection, SortKey},
};
use bookstock_mock::{Dataset, MockGateway};
use thiserror::Error;

use crate::{EngineError, InventoryEngine, LoadOutcome, Phase, fetch};

// ─── Fixtures ────────────────────────────────────────────────────────────────

async fn seeded_engine(store_id: i64) -> InventoryEngine<MockGateway> {
  let mut engine = InventoryEngine::new(Arc::new(MockGateway::seeded()));
  assert_eq!(engine.load(store_id).await, LoadOutcome::Applied);
  engine
}

fn book(id: i64, author_id: i64, title: &str) -> Book {
  Book {
    id,
    author_id,
    title: title.into(),
    isbn: format!("000000000-{id}"),
    language: "English".into(),
    page_count: 100 + id,
    format: BookFormat::Paperback,
  }
}

/// Small fixture: catalog {5, 6, 7}, store 1 stocks 5 and 6.
fn scenario_dataset() -> Dataset {
  let mut data = Dataset::empty();
  data.insert_book(book(5, 1, "The Orchard Wall"));
  data.insert_book(book(6, 1, "An Atlas of Small Rivers"));
  data.insert_book(book(7, 1, "Field Notes"));
  data.insert_author(Author {
    id:         1,
    first_name: "Imogen".into(),
    last_name:  "Clarke".into(),
  });
  data.insert_store(Store {
    id:      1,
    name:    "Main Street Bookstore".into(),
    address: "123 Main St".into(),
  });
  data.insert_inventory_item(InventoryItem { id: 1, store_id: 1, book_id: 5, price: 10.0 });
  data.insert_inventory_item(InventoryItem { id: 2, store_id: 1, book_id: 6, price: 20.0 });
  data
}

async fn scenario_engine() -> InventoryEngine<MockGateway> {
  let mut engine =
    InventoryEngine::new(Arc::new(MockGateway::new(scenario_dataset())));
  assert_eq!(engine.load(1).await, LoadOutcome::Applied);
  engine
}

fn view_ids(engine: &InventoryEngine<impl Gateway>) -> Vec<i64> {
  engine.books().iter().map(|b| b.book.id).collect()
}

// ─── Fault injection double ──────────────────────────────────────────────────

#[derive(Debug, Error)]
enum FaultError {
  #[error("backend unavailable")]
  Injected,
  #[error(transparent)]
  Mock(#[from] bookstock_mock::Error),
}

/// Delegates to a real mock gateway until `broken` is flipped, after which
/// every call fails.
#[derive(Clone)]
struct FaultInjector {
  inner:  MockGateway,
  broken: Arc<AtomicBool>,
}

impl FaultInjector {
  fn new(inner: MockGateway) -> (Self, Arc<AtomicBool>) {
    let broken = Arc::new(AtomicBool::new(false));
    (Self { inner, broken: Arc::clone(&broken) }, broken)
  }

  fn check(&self) -> Result<(), FaultError> {
    if self.broken.load(Ordering::Relaxed) {
      Err(FaultError::Injected)
    } else {
      Ok(())
    }
  }
}

impl Gateway for FaultInjector {
  type Error = FaultError;

  async fn books(&self, query: BookQuery) -> Result<Vec<Book>, FaultError> {
    self.check()?;
    Ok(self.inner.books(query).await?)
  }

  async fn book(&self, id: i64) -> Result<Book, FaultError> {
    self.check()?;
    Ok(self.inner.book(id).await?)
  }

  async fn create_book(&self, input: NewBook) -> Result<Book, FaultError> {
    self.check()?;
    Ok(self.inner.create_book(input).await?)
  }

  async fn update_book(&self, id: i64, patch: BookPatch) -> Result<Book, FaultError> {
    self.check()?;
    Ok(self.inner.update_book(id, patch).await?)
  }

  async fn delete_book(&self, id: i64) -> Result<(), FaultError> {
    self.check()?;
    Ok(self.inner.delete_book(id).await?)
  }

  async fn authors(&self, query: AuthorQuery) -> Result<Vec<Author>, FaultError> {
    self.check()?;
    Ok(self.inner.authors(query).await?)
  }

  async fn author(&self, id: i64) -> Result<Author, FaultError> {
    self.check()?;
    Ok(self.inner.author(id).await?)
  }

  async fn create_author(&self, input: NewAuthor) -> Result<Author, FaultError> {
    self.check()?;
    Ok(self.inner.create_author(input).await?)
  }

  async fn stores(&self, query: StoreQuery) -> Result<Vec<Store>, FaultError> {
    self.check()?;
    Ok(self.inner.stores(query).await?)
  }

  async fn store(&self, id: i64) -> Result<Store, FaultError> {
    self.check()?;
    Ok(self.inner.store(id).await?)
  }

  async fn inventory(
    &self,
    query: InventoryQuery,
  ) -> Result<Vec<InventoryItem>, FaultError> {
    self.check()?;
    Ok(self.inner.inventory(query).await?)
  }

  async fn store_books(&self, store_id: i64) -> Result<Vec<StoreBook>, FaultError> {
    self.check()?;
    Ok(self.inner.store_books(store_id).await?)
  }

  async fn add_inventory_item(
    &self,
    store_id: i64,
    book_id: i64,
    price: f64,
  ) -> Result<InventoryItem, FaultError> {
    self.check()?;
    Ok(self.inner.add_inventory_item(store_id, book_id, price).await?)
  }

  async fn update_inventory_price(
    &self,
    inventory_id: i64,
    price: f64,
  ) -> Result<InventoryItem, FaultError> {
    self.check()?;
    Ok(self.inner.update_inventory_price(inventory_id, price).await?)
  }

  async fn remove_inventory_item(
    &self,
    store_id: i64,
    book_id: i64,
  ) -> Result<(), FaultError> {
    self.check()?;
    Ok(self.inner.remove_inventory_item(store_id, book_id).await?)
  }

  async fn login(&self, credentials: Credentials) -> Result<AuthSession, FaultError> {
    self.check()?;
    Ok(self.inner.login(credentials).await?)
  }

  async fn logout(&self) -> Result<(), FaultError> {
    self.check()?;
    Ok(self.inner.logout().await?)
  }

  async fn current_user(&self) -> Result<Option<User>, FaultError> {
    self.check()?;
    Ok(self.inner.current_user().await?)
  }
}

// ─── Loading ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn load_joins_inventory_catalog_and_authors() {
  let engine = seeded_engine(1).await;

  assert_eq!(engine.phase(), Phase::Ready);
  assert_eq!(engine.store_id(), Some(1));
  assert_eq!(engine.catalog().len(), 6);
  assert_eq!(engine.authors().len(), 5);

  let view = engine.books();
  assert_eq!(view.len(), 2);
  let first = view.iter().find(|b| b.book.id == 1).unwrap();
  assert_eq!(first.author_name, "Tomas Rivera");
  assert_eq!(first.price, 29.99);
  assert_eq!(first.inventory_id, Some(1));
}

#[tokio::test]
async fn load_failure_records_error_and_keeps_previous_data() {
  let (gateway, broken) = FaultInjector::new(MockGateway::seeded());
  let mut engine = InventoryEngine::new(Arc::new(gateway));

  assert_eq!(engine.load(1).await, LoadOutcome::Applied);
  let before = view_ids(&engine);

  broken.store(true, Ordering::Relaxed);
  assert_eq!(engine.load(2).await, LoadOutcome::Failed);

  assert_eq!(engine.phase(), Phase::Errored);
  assert_eq!(engine.error(), Some("backend unavailable"));
  assert!(!engine.is_loading());
  // Stale-but-available: the previous store's rows are still shown.
  assert_eq!(view_ids(&engine), before);
}

#[tokio::test]
async fn superseded_load_response_is_discarded() {
  let gateway = Arc::new(MockGateway::seeded());
  let mut engine = InventoryEngine::new(Arc::clone(&gateway));

  let first = engine.begin_load(1);
  let second = engine.begin_load(2);

  let first_data = fetch(gateway.as_ref(), first.store_id()).await;
  let second_data = fetch(gateway.as_ref(), second.store_id()).await;

  // The older response lands first and must not win.
  assert_eq!(engine.complete_load(first, first_data), LoadOutcome::Discarded);
  assert_eq!(engine.complete_load(second, second_data), LoadOutcome::Applied);

  assert_eq!(engine.store_id(), Some(2));
  let mut ids = view_ids(&engine);
  ids.sort_unstable();
  assert_eq!(ids, [1, 3]);
}

// ─── Search ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn search_matches_title_author_and_id() {
  let mut engine = seeded_engine(1).await;

  engine.set_search_term("WINTER");
  assert_eq!(view_ids(&engine), [1]);

  engine.set_search_term("lindqvist");
  assert_eq!(view_ids(&engine), [2]);

  engine.set_search_term("2");
  assert_eq!(view_ids(&engine), [2]);

  engine.set_search_term("no such book");
  assert!(engine.books().is_empty());
}

#[tokio::test]
async fn whitespace_search_term_leaves_view_unfiltered() {
  let mut engine = seeded_engine(1).await;
  let all = view_ids(&engine);

  engine.set_search_term("   ");
  assert_eq!(view_ids(&engine), all);
}

// ─── Sorting ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn price_sort_directions_are_exact_reverses() {
  let mut engine = seeded_engine(1).await;

  engine.handle_sort(SortKey::Price);
  let ascending = view_ids(&engine);

  engine.handle_sort(SortKey::Price);
  let mut descending = view_ids(&engine);

  assert_eq!(ascending, [2, 1]);
  descending.reverse();
  assert_eq!(descending, ascending);
}

#[tokio::test]
async fn sort_is_stable_for_equal_prices() {
  let mut data = scenario_dataset();
  // Book 7 joins at the same price as book 5; it was inserted later.
  data.insert_inventory_item(InventoryItem { id: 3, store_id: 1, book_id: 7, price: 10.0 });

  let mut engine = InventoryEngine::new(Arc::new(MockGateway::new(data)));
  engine.load(1).await;

  engine.handle_sort(SortKey::Price);
  assert_eq!(view_ids(&engine), [5, 7, 6]);

  engine.handle_sort(SortKey::Price);
  // Descending still keeps 5 before 7: ties preserve insertion order.
  assert_eq!(view_ids(&engine), [6, 5, 7]);
}

#[tokio::test]
async fn sort_toggles_and_resets_per_key() {
  let mut engine = seeded_engine(1).await;

  engine.handle_sort(SortKey::Price);
  assert_eq!(engine.sort().direction, SortDirection::Asc);
  engine.handle_sort(SortKey::Price);
  assert_eq!(engine.sort().direction, SortDirection::Desc);

  engine.handle_sort(SortKey::Title);
  assert_eq!(engine.sort().key, Some(SortKey::Title));
  assert_eq!(engine.sort().direction, SortDirection::Asc);
}

// ─── Available books ─────────────────────────────────────────────────────────

#[tokio::test]
async fn available_books_is_the_catalog_complement() {
  let engine = seeded_engine(1).await;

  let stocked: Vec<i64> = engine.books().iter().map(|b| b.book.id).collect();
  let available: Vec<i64> =
    engine.available_books().iter().map(|b| b.book.id).collect();

  for id in &available {
    assert!(!stocked.contains(id));
  }
  let mut union: Vec<i64> = stocked.iter().chain(&available).copied().collect();
  union.sort_unstable();
  let mut catalog: Vec<i64> = engine.catalog().iter().map(|b| b.id).collect();
  catalog.sort_unstable();
  assert_eq!(union, catalog);
}

#[tokio::test]
async fn available_books_scenario() {
  let engine = scenario_engine().await;
  let available = engine.available_books();
  assert_eq!(available.len(), 1);
  assert_eq!(available[0].book.id, 7);
  assert_eq!(available[0].author_name, "Imogen Clarke");
}

#[tokio::test]
async fn available_books_falls_back_to_unknown_author() {
  let engine = seeded_engine(1).await;
  // Book 6's author_id has no catalog row.
  let orphan = engine
    .available_books()
    .into_iter()
    .find(|b| b.book.id == 6)
    .unwrap();
  assert_eq!(orphan.author_name, UNKNOWN_AUTHOR);
}

// ─── Mutations ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_book_refetches_view_with_inventory_id() {
  let mut engine = scenario_engine().await;

  engine.add_book(7, 12.50).await.unwrap();

  let view = engine.books();
  let added = view.iter().find(|b| b.book.id == 7).unwrap();
  assert_eq!(added.price, 12.50);
  assert_eq!(added.inventory_id, Some(3));

  // The added book left the available list.
  assert!(engine.available_books().is_empty());
}

#[tokio::test]
async fn update_price_patches_view_and_backend() {
  let gateway = Arc::new(MockGateway::new(scenario_dataset()));
  let mut engine = InventoryEngine::new(Arc::clone(&gateway));
  engine.load(1).await;

  engine.update_price(5, 12.0).await.unwrap();

  let price = engine.books().iter().find(|b| b.book.id == 5).unwrap().price;
  assert_eq!(price, 12.0);

  let rows = gateway
    .inventory(InventoryQuery { store_id: Some(1) })
    .await
    .unwrap();
  let row = rows.iter().find(|i| i.book_id == 5).unwrap();
  assert_eq!(row.price, 12.0);
}

#[tokio::test]
async fn update_price_for_absent_book_fails_without_mutating() {
  let mut engine = scenario_engine().await;
  let before = view_ids(&engine);

  let err = engine.update_price(7, 5.0).await.unwrap_err();
  assert!(matches!(err, EngineError::NotInInventory(7)));
  assert_eq!(view_ids(&engine), before);
}

#[tokio::test]
async fn update_price_requires_an_inventory_id() {
  let gateway = Arc::new(MockGateway::new(scenario_dataset()));
  let mut engine = InventoryEngine::new(Arc::clone(&gateway));

  // A backend that drops inventory ids: craft the view by hand through the
  // load seam.
  let ticket = engine.begin_load(1);
  let mut data = fetch(gateway.as_ref(), 1).await.unwrap();
  for row in &mut data.store_books {
    row.inventory_id = None;
  }
  assert_eq!(engine.complete_load(ticket, Ok(data)), LoadOutcome::Applied);

  let err = engine.update_price(5, 12.0).await.unwrap_err();
  assert!(matches!(err, EngineError::MissingInventoryId(5)));
}

#[tokio::test]
async fn remove_book_drops_the_row_after_gateway_success() {
  let mut engine = scenario_engine().await;

  engine.remove_book(6).await.unwrap();
  assert_eq!(view_ids(&engine), [5]);

  // And the book is available for re-adding.
  assert!(engine.available_books().iter().any(|b| b.book.id == 6));
}

#[tokio::test]
async fn remove_book_failure_leaves_the_view_untouched() {
  let (gateway, broken) = FaultInjector::new(MockGateway::new(scenario_dataset()));
  let mut engine = InventoryEngine::new(Arc::new(gateway));
  engine.load(1).await;

  broken.store(true, Ordering::Relaxed);

  let err = engine.remove_book(6).await.unwrap_err();
  assert!(matches!(err, EngineError::Gateway(_)));
  assert!(engine.books().iter().any(|b| b.book.id == 6));
}

#[tokio::test]
async fn mutations_require_a_loaded_store() {
  let mut engine = InventoryEngine::new(Arc::new(MockGateway::seeded()));

  assert!(matches!(
    engine.add_book(1, 9.99).await.unwrap_err(),
    EngineError::NoStoreLoaded
  ));
  assert!(matches!(
    engine.update_price(1, 9.99).await.unwrap_err(),
    EngineError::NoStoreLoaded
  ));
  assert!(matches!(
    engine.remove_book(1).await.unwrap_err(),
    EngineError::NoStoreLoaded
  ));
}
