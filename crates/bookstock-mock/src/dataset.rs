//! [`Dataset`] — the in-memory tables behind the mock backend.
//!
//! Operations mirror the REST surface one-for-one: the same filters, the
//! same id allocation (max + 1), the same not-found failures. The
//! store-books join is the canonical implementation of the denormalized
//! view the engine consumes.

use bookstock_core::{
  catalog::{Author, Book, Store},
  gateway::{AuthorQuery, BookQuery, InventoryQuery, NewAuthor, NewBook, BookPatch, StoreQuery},
  inventory::{InventoryItem, StoreBook, UNKNOWN_AUTHOR},
  session::{AuthSession, Credentials, User},
};
use chrono::Utc;
use uuid::Uuid;

use crate::{Error, Result, data};

/// A development account: a user plus its fixture password.
#[derive(Debug, Clone)]
pub struct DevUser {
  pub user:     User,
  pub password: String,
}

/// The mutable in-memory state of the mock backend.
#[derive(Debug, Default)]
pub struct Dataset {
  books:     Vec<Book>,
  authors:   Vec<Author>,
  stores:    Vec<Store>,
  inventory: Vec<InventoryItem>,
  users:     Vec<DevUser>,
  session:   Option<AuthSession>,
}

impl Dataset {
  /// An empty dataset with only the dev accounts — useful for tests that
  /// build their own fixtures.
  pub fn empty() -> Self {
    Self { users: data::dev_users(), ..Self::default() }
  }

  /// The default seeded dataset.
  pub fn seeded() -> Self {
    Self {
      books:     data::books(),
      authors:   data::authors(),
      stores:    data::stores(),
      inventory: data::inventory(),
      users:     data::dev_users(),
      session:   None,
    }
  }

  // ── Fixture plumbing ──────────────────────────────────────────────────────

  pub fn insert_book(&mut self, book: Book) {
    self.books.push(book);
  }

  pub fn insert_author(&mut self, author: Author) {
    self.authors.push(author);
  }

  pub fn insert_store(&mut self, store: Store) {
    self.stores.push(store);
  }

  pub fn insert_inventory_item(&mut self, item: InventoryItem) {
    self.inventory.push(item);
  }

  // ── Books ─────────────────────────────────────────────────────────────────

  pub fn books(&self, query: &BookQuery) -> Vec<Book> {
    let mut books: Vec<Book> = match query.store_id {
      Some(store_id) => self
        .books
        .iter()
        .filter(|b| self.is_stocked(store_id, b.id))
        .cloned()
        .collect(),
      None => self.books.clone(),
    };

    if let Some(search) = &query.search {
      let needle = search.to_lowercase();
      books.retain(|b| b.title.to_lowercase().contains(&needle));
    }

    books
  }

  pub fn book(&self, id: i64) -> Result<Book> {
    self
      .books
      .iter()
      .find(|b| b.id == id)
      .cloned()
      .ok_or(Error::BookNotFound(id))
  }

  pub fn create_book(&mut self, input: NewBook) -> Book {
    let book = Book {
      id:         next_id(self.books.iter().map(|b| b.id)),
      author_id:  input.author_id,
      title:      input.title,
      isbn:       input.isbn,
      language:   input.language,
      page_count: input.page_count,
      format:     input.format,
    };
    self.books.push(book.clone());
    book
  }

  pub fn update_book(&mut self, id: i64, patch: BookPatch) -> Result<Book> {
    let book = self
      .books
      .iter_mut()
      .find(|b| b.id == id)
      .ok_or(Error::BookNotFound(id))?;

    if let Some(author_id) = patch.author_id {
      book.author_id = author_id;
    }
    if let Some(title) = patch.title {
      book.title = title;
    }
    if let Some(isbn) = patch.isbn {
      book.isbn = isbn;
    }
    if let Some(language) = patch.language {
      book.language = language;
    }
    if let Some(page_count) = patch.page_count {
      book.page_count = page_count;
    }
    if let Some(format) = patch.format {
      book.format = format;
    }

    Ok(book.clone())
  }

  pub fn delete_book(&mut self, id: i64) -> Result<()> {
    let before = self.books.len();
    self.books.retain(|b| b.id != id);
    if self.books.len() == before {
      return Err(Error::BookNotFound(id));
    }
    Ok(())
  }

  // ── Authors ───────────────────────────────────────────────────────────────

  pub fn authors(&self, query: &AuthorQuery) -> Vec<Author> {
    match &query.search {
      Some(search) => {
        let needle = search.to_lowercase();
        self
          .authors
          .iter()
          .filter(|a| a.display_name().to_lowercase().contains(&needle))
          .cloned()
          .collect()
      }
      None => self.authors.clone(),
    }
  }

  pub fn author(&self, id: i64) -> Result<Author> {
    self
      .authors
      .iter()
      .find(|a| a.id == id)
      .cloned()
      .ok_or(Error::AuthorNotFound(id))
  }

  pub fn create_author(&mut self, input: NewAuthor) -> Author {
    let author = Author {
      id:         next_id(self.authors.iter().map(|a| a.id)),
      first_name: input.first_name,
      last_name:  input.last_name,
    };
    self.authors.push(author.clone());
    author
  }

  // ── Stores ────────────────────────────────────────────────────────────────

  pub fn stores(&self, query: &StoreQuery) -> Vec<Store> {
    match &query.search {
      Some(search) => {
        let needle = search.to_lowercase();
        self
          .stores
          .iter()
          .filter(|s| s.name.to_lowercase().contains(&needle))
          .cloned()
          .collect()
      }
      None => self.stores.clone(),
    }
  }

  pub fn store(&self, id: i64) -> Result<Store> {
    self
      .stores
      .iter()
      .find(|s| s.id == id)
      .cloned()
      .ok_or(Error::StoreNotFound(id))
  }

  // ── Inventory ─────────────────────────────────────────────────────────────

  pub fn inventory(&self, query: &InventoryQuery) -> Vec<InventoryItem> {
    match query.store_id {
      Some(store_id) => self
        .inventory
        .iter()
        .filter(|i| i.store_id == store_id)
        .cloned()
        .collect(),
      None => self.inventory.clone(),
    }
  }

  /// The denormalized per-store view: catalog fields joined with the
  /// matching inventory row and a resolved author display name.
  pub fn store_books(&self, store_id: i64) -> Vec<StoreBook> {
    self
      .books
      .iter()
      .filter_map(|book| {
        let item = self
          .inventory
          .iter()
          .find(|i| i.store_id == store_id && i.book_id == book.id)?;
        let author_name = self
          .authors
          .iter()
          .find(|a| a.id == book.author_id)
          .map(Author::display_name)
          .unwrap_or_else(|| UNKNOWN_AUTHOR.to_owned());
        Some(StoreBook {
          book: book.clone(),
          price: item.price,
          author_name,
          inventory_id: Some(item.id),
        })
      })
      .collect()
  }

  pub fn add_inventory_item(
    &mut self,
    store_id: i64,
    book_id: i64,
    price: f64,
  ) -> Result<InventoryItem> {
    if self.is_stocked(store_id, book_id) {
      return Err(Error::AlreadyStocked { store_id, book_id });
    }

    let item = InventoryItem {
      id: next_id(self.inventory.iter().map(|i| i.id)),
      store_id,
      book_id,
      price,
    };
    self.inventory.push(item.clone());
    Ok(item)
  }

  pub fn update_inventory_price(&mut self, id: i64, price: f64) -> Result<InventoryItem> {
    let item = self
      .inventory
      .iter_mut()
      .find(|i| i.id == id)
      .ok_or(Error::InventoryItemNotFound(id))?;
    item.price = price;
    Ok(item.clone())
  }

  /// `DELETE /api/inventory/{id}` semantics.
  pub fn remove_inventory_item_by_id(&mut self, id: i64) -> Result<()> {
    let before = self.inventory.len();
    self.inventory.retain(|i| i.id != id);
    if self.inventory.len() == before {
      return Err(Error::InventoryItemNotFound(id));
    }
    Ok(())
  }

  /// `DELETE /api/inventory/store/{store_id}/book/{book_id}` semantics.
  pub fn remove_inventory_item(&mut self, store_id: i64, book_id: i64) -> Result<()> {
    let before = self.inventory.len();
    self
      .inventory
      .retain(|i| !(i.store_id == store_id && i.book_id == book_id));
    if self.inventory.len() == before {
      return Err(Error::BookNotStocked { store_id, book_id });
    }
    Ok(())
  }

  fn is_stocked(&self, store_id: i64, book_id: i64) -> bool {
    self
      .inventory
      .iter()
      .any(|i| i.store_id == store_id && i.book_id == book_id)
  }

  // ── Auth ──────────────────────────────────────────────────────────────────

  pub fn login(&mut self, credentials: &Credentials) -> Result<AuthSession> {
    let account = self
      .users
      .iter()
      .find(|u| {
        u.user.username == credentials.username && u.password == credentials.password
      })
      .ok_or(Error::InvalidCredentials)?;

    let session = AuthSession {
      user:         account.user.clone(),
      token:        Uuid::new_v4().to_string(),
      logged_in_at: Utc::now(),
    };
    self.session = Some(session.clone());
    Ok(session)
  }

  pub fn logout(&mut self) {
    self.session = None;
  }

  pub fn current_user(&self) -> Option<User> {
    self.session.as_ref().map(|s| s.user.clone())
  }
}

fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
  ids.max().unwrap_or(0) + 1
}
