//! [`MockGateway`] — the `Gateway` implementation over an in-memory
//! [`Dataset`].

use std::sync::Arc;

use bookstock_core::{
  catalog::{Author, Book, Store},
  gateway::{
    AuthorQuery, BookPatch, BookQuery, Gateway, InventoryQuery, NewAuthor,
    NewBook, StoreQuery,
  },
  inventory::{InventoryItem, StoreBook},
  session::{AuthSession, Credentials, User},
};
use tokio::sync::RwLock;

use crate::{Dataset, Error, Result};

/// Gateway over an in-process dataset.
///
/// Cheap to clone — every clone shares the same dataset, so mutations made
/// through one handle are visible through all of them (and through a dev
/// server holding the same `Arc`).
#[derive(Clone)]
pub struct MockGateway {
  data: Arc<RwLock<Dataset>>,
}

impl MockGateway {
  pub fn new(dataset: Dataset) -> Self {
    Self { data: Arc::new(RwLock::new(dataset)) }
  }

  /// Gateway over the default seeded dataset.
  pub fn seeded() -> Self {
    Self::new(Dataset::seeded())
  }

  /// Share an existing dataset, e.g. one also served over HTTP.
  pub fn shared(data: Arc<RwLock<Dataset>>) -> Self {
    Self { data }
  }

  /// Handle to the underlying dataset for out-of-band fixture setup.
  pub fn dataset(&self) -> Arc<RwLock<Dataset>> {
    Arc::clone(&self.data)
  }
}

impl Gateway for MockGateway {
  type Error = Error;

  // ── Books ─────────────────────────────────────────────────────────────────

  async fn books(&self, query: BookQuery) -> Result<Vec<Book>> {
    Ok(self.data.read().await.books(&query))
  }

  async fn book(&self, id: i64) -> Result<Book> {
    self.data.read().await.book(id)
  }

  async fn create_book(&self, book: NewBook) -> Result<Book> {
    Ok(self.data.write().await.create_book(book))
  }

  async fn update_book(&self, id: i64, patch: BookPatch) -> Result<Book> {
    self.data.write().await.update_book(id, patch)
  }

  async fn delete_book(&self, id: i64) -> Result<()> {
    self.data.write().await.delete_book(id)
  }

  // ── Authors ───────────────────────────────────────────────────────────────

  async fn authors(&self, query: AuthorQuery) -> Result<Vec<Author>> {
    Ok(self.data.read().await.authors(&query))
  }

  async fn author(&self, id: i64) -> Result<Author> {
    self.data.read().await.author(id)
  }

  async fn create_author(&self, author: NewAuthor) -> Result<Author> {
    Ok(self.data.write().await.create_author(author))
  }

  // ── Stores ────────────────────────────────────────────────────────────────

  async fn stores(&self, query: StoreQuery) -> Result<Vec<Store>> {
    Ok(self.data.read().await.stores(&query))
  }

  async fn store(&self, id: i64) -> Result<Store> {
    self.data.read().await.store(id)
  }

  // ── Inventory ─────────────────────────────────────────────────────────────

  async fn inventory(&self, query: InventoryQuery) -> Result<Vec<InventoryItem>> {
    Ok(self.data.read().await.inventory(&query))
  }

  async fn store_books(&self, store_id: i64) -> Result<Vec<StoreBook>> {
    Ok(self.data.read().await.store_books(store_id))
  }

  async fn add_inventory_item(
    &self,
    store_id: i64,
    book_id: i64,
    price: f64,
  ) -> Result<InventoryItem> {
    self.data.write().await.add_inventory_item(store_id, book_id, price)
  }

  async fn update_inventory_price(
    &self,
    inventory_id: i64,
    price: f64,
  ) -> Result<InventoryItem> {
    self.data.write().await.update_inventory_price(inventory_id, price)
  }

  async fn remove_inventory_item(&self, store_id: i64, book_id: i64) -> Result<()> {
    self.data.write().await.remove_inventory_item(store_id, book_id)
  }

  // ── Auth ──────────────────────────────────────────────────────────────────

  async fn login(&self, credentials: Credentials) -> Result<AuthSession> {
    self.data.write().await.login(&credentials)
  }

  async fn logout(&self) -> Result<()> {
    self.data.write().await.logout();
    Ok(())
  }

  async fn current_user(&self) -> Result<Option<User>> {
    Ok(self.data.read().await.current_user())
  }
}
