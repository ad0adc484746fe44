//! Application state machine and event dispatcher.

use std::sync::Arc;

use bookstock_core::{
  catalog::Store,
  gateway::{Gateway, StoreQuery},
  inventory::StoreBook,
  session::{Credentials, Session},
  sort::SortKey,
};
use bookstock_engine::{InventoryEngine, LoadOutcome};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};

// ─── Screen & input mode ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Pick a store to manage.
  StoreList,
  /// The inventory view for the selected store.
  Inventory,
}

/// Which prompt, if any, currently captures typed characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
  None,
  /// Fuzzy filter over the store list.
  StoreFilter,
  /// The inventory search term.
  Search,
  /// Choosing a catalog book to add to the store.
  AddSelect,
  /// Entering the price for the chosen book.
  AddPrice { book_id: i64, buffer: String },
  /// Entering a new price for the row under the cursor.
  EditPrice { book_id: i64, buffer: String },
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
///
/// Holds the session and gates every mutating key on it — the engine itself
/// performs no authorization.
pub struct App<G> {
  pub screen: Screen,
  pub input:  InputMode,

  /// All stores returned by the API on startup.
  pub stores:       Vec<Store>,
  /// Current fuzzy-filter string for the store list.
  pub store_filter: String,
  /// Cursor position within the *filtered* store list.
  pub store_cursor: usize,

  /// Cursor position within the filtered-and-sorted inventory view.
  pub inv_cursor: usize,
  /// Cursor position within the add-book picker.
  pub add_cursor: usize,

  pub session: Session,
  pub engine:  InventoryEngine<G>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  gateway: Arc<G>,
}

impl<G: Gateway> App<G> {
  pub fn new(gateway: Arc<G>) -> Self {
    Self {
      screen: Screen::StoreList,
      input: InputMode::None,
      stores: Vec::new(),
      store_filter: String::new(),
      store_cursor: 0,
      inv_cursor: 0,
      add_cursor: 0,
      session: Session::anonymous(),
      engine: InventoryEngine::new(Arc::clone(&gateway)),
      status_msg: String::new(),
      gateway,
    }
  }

  // ── Session ───────────────────────────────────────────────────────────────

  /// Log in through the gateway and bind the resulting user to the session.
  pub async fn login(&mut self, credentials: Credentials) {
    match self.gateway.login(credentials).await {
      Ok(auth) => {
        self.status_msg = format!("Logged in as {}", auth.user.name);
        self.session = Session::authenticated(auth.user);
      }
      Err(e) => {
        self.status_msg = format!("Login failed: {e}");
      }
    }
  }

  /// Whether the session may mutate inventory; sets a status hint if not.
  fn require_edit(&mut self) -> bool {
    if self.session.can_mutate_inventory() {
      return true;
    }
    self.status_msg = "Editing requires an admin or manager login".into();
    false
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch all stores from the API and populate `self.stores`.
  pub async fn load_stores(&mut self) -> anyhow::Result<()> {
    self.status_msg = "Loading stores…".into();
    match self.gateway.stores(StoreQuery::default()).await {
      Ok(stores) => {
        self.stores = stores;
        self.store_cursor = 0;
        self.status_msg = String::new();
        Ok(())
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        Err(e.into())
      }
    }
  }

  /// Load `store_id`'s inventory and switch to the inventory screen.
  async fn open_store(&mut self, store_id: i64) {
    if self.engine.load(store_id).await == LoadOutcome::Failed {
      if let Some(e) = self.engine.error() {
        self.status_msg = format!("Error: {e}");
      }
    } else {
      self.status_msg = String::new();
    }
    self.inv_cursor = 0;
    self.screen = Screen::Inventory;
  }

  // ── Filtered views ────────────────────────────────────────────────────────

  /// Stores matching the current fuzzy filter.
  pub fn filtered_stores(&self) -> Vec<&Store> {
    if self.store_filter.is_empty() {
      return self.stores.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .stores
      .iter()
      .filter(|s| {
        matcher.fuzzy_match(&s.name, &self.store_filter).is_some()
          || matcher
            .fuzzy_match(&s.id.to_string(), &self.store_filter)
            .is_some()
      })
      .collect()
  }

  /// The store under the list cursor in the filtered view, if any.
  pub fn cursor_store(&self) -> Option<&Store> {
    let list = self.filtered_stores();
    list.get(self.store_cursor).copied()
  }

  /// The inventory row under the cursor, if any.
  pub fn cursor_row(&self) -> Option<&StoreBook> {
    self.engine.books().get(self.inv_cursor).copied()
  }

  fn clamp_inv_cursor(&mut self) {
    let len = self.engine.books().len();
    if len == 0 {
      self.inv_cursor = 0;
    } else if self.inv_cursor >= len {
      self.inv_cursor = len - 1;
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    // Prompt input modes capture all printable keys.
    match self.input.clone() {
      InputMode::StoreFilter => return self.handle_store_filter_key(key).await,
      InputMode::Search => {
        self.handle_search_key(key);
        return Ok(true);
      }
      InputMode::AddSelect => {
        self.handle_add_select_key(key);
        return Ok(true);
      }
      InputMode::AddPrice { book_id, buffer } => {
        return self.handle_price_key(key, book_id, buffer, true).await;
      }
      InputMode::EditPrice { book_id, buffer } => {
        return self.handle_price_key(key, book_id, buffer, false).await;
      }
      InputMode::None => {}
    }

    match self.screen {
      Screen::StoreList => self.handle_store_list_key(key).await,
      Screen::Inventory => self.handle_inventory_key(key).await,
    }
  }

  async fn handle_store_filter_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Esc => {
        self.input = InputMode::None;
        self.store_filter.clear();
        self.store_cursor = 0;
      }
      KeyCode::Enter => {
        self.input = InputMode::None;
        self.store_cursor = 0;
        // Immediately open the store if there's exactly one match.
        let only = {
          let list = self.filtered_stores();
          if list.len() == 1 { Some(list[0].id) } else { None }
        };
        if let Some(id) = only {
          self.open_store(id).await;
        }
      }
      KeyCode::Backspace => {
        self.store_filter.pop();
        self.store_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.store_filter.push(c);
        self.store_cursor = 0;
      }
      _ => {}
    }
    Ok(true)
  }

  async fn handle_store_list_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      // Quit
      KeyCode::Char('q') => return Ok(false),

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_stores().len();
        if len > 0 && self.store_cursor + 1 < len {
          self.store_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        if self.store_cursor > 0 {
          self.store_cursor -= 1;
        }
      }

      // Open the selected store
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if let Some(id) = self.cursor_store().map(|s| s.id) {
          self.open_store(id).await;
        }
      }

      // Filter
      KeyCode::Char('/') => {
        self.input = InputMode::StoreFilter;
        self.store_filter.clear();
        self.store_cursor = 0;
      }

      _ => {}
    }
    Ok(true)
  }

  async fn handle_inventory_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      // Quit
      KeyCode::Char('q') => return Ok(false),

      // Back to the store list
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.screen = Screen::StoreList;
        self.status_msg = String::new();
      }

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.engine.books().len();
        if len > 0 && self.inv_cursor + 1 < len {
          self.inv_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        if self.inv_cursor > 0 {
          self.inv_cursor -= 1;
        }
      }

      // Search
      KeyCode::Char('/') => {
        self.input = InputMode::Search;
        self.inv_cursor = 0;
      }

      // Sort columns
      KeyCode::Char(c @ '1'..='6') => {
        self.engine.handle_sort(sort_key_for(c));
        self.inv_cursor = 0;
      }

      // Reload the current store
      KeyCode::Char('r') => {
        if let Some(store_id) = self.engine.store_id() {
          self.open_store(store_id).await;
        }
      }

      // Add a catalog book to this store
      KeyCode::Char('a') => {
        if self.require_edit() {
          if self.engine.available_books().is_empty() {
            self.status_msg = "Every catalog book is already stocked here".into();
          } else {
            self.add_cursor = 0;
            self.input = InputMode::AddSelect;
          }
        }
      }

      // Reprice the row under the cursor
      KeyCode::Char('e') => {
        if self.require_edit()
          && let Some((book_id, price)) =
            self.cursor_row().map(|b| (b.book.id, b.price))
        {
          self.input = InputMode::EditPrice {
            book_id,
            buffer: format!("{price:.2}"),
          };
        }
      }

      // Remove the row under the cursor
      KeyCode::Char('d') => {
        if self.require_edit()
          && let Some((book_id, title)) =
            self.cursor_row().map(|b| (b.book.id, b.book.title.clone()))
        {
          match self.engine.remove_book(book_id).await {
            Ok(()) => self.status_msg = format!("Removed \"{title}\""),
            Err(e) => self.status_msg = format!("Error: {e}"),
          }
          self.clamp_inv_cursor();
        }
      }

      _ => {}
    }
    Ok(true)
  }

  fn handle_search_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.input = InputMode::None;
        self.engine.set_search_term("");
        self.inv_cursor = 0;
      }
      KeyCode::Enter => {
        self.input = InputMode::None;
      }
      KeyCode::Backspace => {
        let mut term = self.engine.search_term().to_owned();
        term.pop();
        self.engine.set_search_term(term);
        self.inv_cursor = 0;
      }
      KeyCode::Char(c) => {
        let mut term = self.engine.search_term().to_owned();
        term.push(c);
        self.engine.set_search_term(term);
        self.inv_cursor = 0;
      }
      _ => {}
    }
  }

  fn handle_add_select_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.input = InputMode::None;
      }
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.engine.available_books().len();
        if len > 0 && self.add_cursor + 1 < len {
          self.add_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        if self.add_cursor > 0 {
          self.add_cursor -= 1;
        }
      }
      KeyCode::Enter => {
        if let Some(book) = self.engine.available_books().get(self.add_cursor) {
          self.input = InputMode::AddPrice {
            book_id: book.book.id,
            buffer:  String::new(),
          };
        }
      }
      _ => {}
    }
  }

  /// Shared prompt handling for the add-price and edit-price inputs.
  async fn handle_price_key(
    &mut self,
    key: KeyEvent,
    book_id: i64,
    mut buffer: String,
    adding: bool,
  ) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Esc => {
        self.input = InputMode::None;
      }
      KeyCode::Backspace => {
        buffer.pop();
        self.input = price_mode(book_id, buffer, adding);
      }
      KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
        buffer.push(c);
        self.input = price_mode(book_id, buffer, adding);
      }
      KeyCode::Enter => {
        // Input validation is the presentation layer's job; the engine
        // passes prices through as given.
        let Ok(price) = buffer.parse::<f64>() else {
          self.status_msg = format!("Not a price: {buffer:?}");
          return Ok(true);
        };
        if !price.is_finite() || price < 0.0 {
          self.status_msg = "Price must be non-negative".into();
          return Ok(true);
        }

        self.input = InputMode::None;
        let result = if adding {
          self.engine.add_book(book_id, price).await
        } else {
          self.engine.update_price(book_id, price).await
        };
        match result {
          Ok(()) => self.status_msg = format!("Priced book {book_id} at {price:.2}"),
          Err(e) => self.status_msg = format!("Error: {e}"),
        }
        self.clamp_inv_cursor();
      }
      _ => {}
    }
    Ok(true)
  }
}

fn price_mode(book_id: i64, buffer: String, adding: bool) -> InputMode {
  if adding {
    InputMode::AddPrice { book_id, buffer }
  } else {
    InputMode::EditPrice { book_id, buffer }
  }
}

/// Column keys `1`–`6` map onto the sortable fields in display order.
fn sort_key_for(c: char) -> SortKey {
  match c {
    '1' => SortKey::Id,
    '2' => SortKey::Title,
    '3' => SortKey::AuthorName,
    '4' => SortKey::Price,
    '5' => SortKey::PageCount,
    _ => SortKey::Format,
  }
}
