//! [`HttpGateway`] — the reqwest implementation of the `Gateway` trait.

use std::time::Duration;

use bookstock_core::{
  catalog::{Author, Book, Store},
  gateway::{
    AuthorQuery, BookPatch, BookQuery, Gateway, InventoryQuery, NewAuthor,
    NewBook, StoreQuery,
  },
  inventory::{InventoryItem, StoreBook},
  session::{AuthSession, Credentials, User},
};
use chrono::Utc;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::ApiError;

const RETRY_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Connection settings for the backend.
#[derive(Debug, Clone)]
pub struct HttpConfig {
  pub base_url: String,
  pub timeout:  Duration,
}

impl Default for HttpConfig {
  fn default() -> Self {
    Self {
      base_url: "http://localhost:3001".to_string(),
      timeout:  Duration::from_secs(10),
    }
  }
}

// ─── Wire shapes ─────────────────────────────────────────────────────────────

/// Error body returned by the backend on non-success statuses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
  message: Option<String>,
  code:    Option<String>,
  error:   Option<String>,
}

/// Plain `{"success": true}` acknowledgement.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Ack {
  success: bool,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
  success: bool,
  user:    Option<User>,
  token:   Option<String>,
  message: Option<String>,
}

#[derive(Debug, Serialize)]
struct NewInventoryBody {
  store_id: i64,
  book_id:  i64,
  price:    f64,
}

#[derive(Debug, Serialize)]
struct PriceBody {
  price: f64,
}

// ─── Gateway ─────────────────────────────────────────────────────────────────

/// Async HTTP client for the Bookstock REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HttpGateway {
  client: Client,
  config: HttpConfig,
}

impl HttpGateway {
  pub fn new(config: HttpConfig) -> Result<Self, ApiError> {
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(ApiError::from)?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{path}", self.config.base_url.trim_end_matches('/'))
  }

  /// Run one request to completion: transport errors, non-success statuses
  /// with a decoded error body, then the JSON payload.
  async fn execute<T: DeserializeOwned>(
    &self,
    request: RequestBuilder,
  ) -> Result<T, ApiError> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
      let body: ErrorBody = response.json().await.unwrap_or_default();
      return Err(ApiError {
        status:  Some(status.as_u16()),
        code:    body.code,
        message: body
          .message
          .or(body.error)
          .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16())),
      });
    }

    Ok(response.json().await?)
  }

  /// Execute with bounded retry. `build` produces a fresh request per
  /// attempt; only transient failures are retried, with a fixed delay.
  async fn send<T: DeserializeOwned>(
    &self,
    build: impl Fn(&Client) -> RequestBuilder,
  ) -> Result<T, ApiError> {
    let mut attempt = 0;
    loop {
      attempt += 1;
      match self.execute(build(&self.client)).await {
        Err(e) if attempt < RETRY_ATTEMPTS && e.is_transient() => {
          tracing::warn!(attempt, error = %e, "transient backend failure; retrying");
          tokio::time::sleep(RETRY_DELAY).await;
        }
        other => return other,
      }
    }
  }
}

impl Gateway for HttpGateway {
  type Error = ApiError;

  // ── Books ─────────────────────────────────────────────────────────────────

  /// `GET /api/books[?search=...][&storeId=...]`
  async fn books(&self, query: BookQuery) -> Result<Vec<Book>, ApiError> {
    self
      .send(|c| {
        let mut req = c.get(self.url("/api/books"));
        if let Some(search) = &query.search {
          req = req.query(&[("search", search)]);
        }
        if let Some(store_id) = query.store_id {
          req = req.query(&[("storeId", store_id.to_string())]);
        }
        req
      })
      .await
  }

  /// `GET /api/books/{id}`
  async fn book(&self, id: i64) -> Result<Book, ApiError> {
    self.send(|c| c.get(self.url(&format!("/api/books/{id}")))).await
  }

  /// `POST /api/books`
  async fn create_book(&self, book: NewBook) -> Result<Book, ApiError> {
    self
      .send(|c| c.post(self.url("/api/books")).json(&book))
      .await
  }

  /// `PUT /api/books/{id}`
  async fn update_book(&self, id: i64, patch: BookPatch) -> Result<Book, ApiError> {
    self
      .send(|c| c.put(self.url(&format!("/api/books/{id}"))).json(&patch))
      .await
  }

  /// `DELETE /api/books/{id}`
  async fn delete_book(&self, id: i64) -> Result<(), ApiError> {
    let _: Ack = self
      .send(|c| c.delete(self.url(&format!("/api/books/{id}"))))
      .await?;
    Ok(())
  }

  // ── Authors ───────────────────────────────────────────────────────────────

  /// `GET /api/authors[?search=...]`
  async fn authors(&self, query: AuthorQuery) -> Result<Vec<Author>, ApiError> {
    self
      .send(|c| {
        let mut req = c.get(self.url("/api/authors"));
        if let Some(search) = &query.search {
          req = req.query(&[("search", search)]);
        }
        req
      })
      .await
  }

  /// `GET /api/authors/{id}`
  async fn author(&self, id: i64) -> Result<Author, ApiError> {
    self.send(|c| c.get(self.url(&format!("/api/authors/{id}")))).await
  }

  /// `POST /api/authors`
  async fn create_author(&self, author: NewAuthor) -> Result<Author, ApiError> {
    self
      .send(|c| c.post(self.url("/api/authors")).json(&author))
      .await
  }

  // ── Stores ────────────────────────────────────────────────────────────────

  /// `GET /api/stores[?search=...]`
  async fn stores(&self, query: StoreQuery) -> Result<Vec<Store>, ApiError> {
    self
      .send(|c| {
        let mut req = c.get(self.url("/api/stores"));
        if let Some(search) = &query.search {
          req = req.query(&[("search", search)]);
        }
        req
      })
      .await
  }

  /// `GET /api/stores/{id}`
  async fn store(&self, id: i64) -> Result<Store, ApiError> {
    self.send(|c| c.get(self.url(&format!("/api/stores/{id}")))).await
  }

  // ── Inventory ─────────────────────────────────────────────────────────────

  /// `GET /api/inventory[?storeId=...]`
  async fn inventory(&self, query: InventoryQuery) -> Result<Vec<InventoryItem>, ApiError> {
    self
      .send(|c| {
        let mut req = c.get(self.url("/api/inventory"));
        if let Some(store_id) = query.store_id {
          req = req.query(&[("storeId", store_id.to_string())]);
        }
        req
      })
      .await
  }

  /// `GET /api/inventory/{store_id}/books`
  async fn store_books(&self, store_id: i64) -> Result<Vec<StoreBook>, ApiError> {
    self
      .send(|c| c.get(self.url(&format!("/api/inventory/{store_id}/books"))))
      .await
  }

  /// `POST /api/inventory`
  async fn add_inventory_item(
    &self,
    store_id: i64,
    book_id: i64,
    price: f64,
  ) -> Result<InventoryItem, ApiError> {
    let body = NewInventoryBody { store_id, book_id, price };
    self
      .send(|c| c.post(self.url("/api/inventory")).json(&body))
      .await
  }

  /// `PUT /api/inventory/{id}`
  async fn update_inventory_price(
    &self,
    inventory_id: i64,
    price: f64,
  ) -> Result<InventoryItem, ApiError> {
    let body = PriceBody { price };
    self
      .send(|c| {
        c.put(self.url(&format!("/api/inventory/{inventory_id}"))).json(&body)
      })
      .await
  }

  /// `DELETE /api/inventory/store/{store_id}/book/{book_id}`
  async fn remove_inventory_item(
    &self,
    store_id: i64,
    book_id: i64,
  ) -> Result<(), ApiError> {
    let _: Ack = self
      .send(|c| {
        c.delete(self.url(&format!("/api/inventory/store/{store_id}/book/{book_id}")))
      })
      .await?;
    Ok(())
  }

  // ── Auth ──────────────────────────────────────────────────────────────────

  /// `POST /api/auth/login`
  async fn login(&self, credentials: Credentials) -> Result<AuthSession, ApiError> {
    let response: AuthResponse = self
      .send(|c| c.post(self.url("/api/auth/login")).json(&credentials))
      .await?;

    match response {
      AuthResponse { success: true, user: Some(user), token, .. } => Ok(AuthSession {
        user,
        token: token.unwrap_or_default(),
        logged_in_at: Utc::now(),
      }),
      AuthResponse { message, .. } => Err(ApiError::new(
        message.unwrap_or_else(|| "login failed".to_string()),
      )),
    }
  }

  /// `POST /api/auth/logout`
  async fn logout(&self) -> Result<(), ApiError> {
    let _: Ack = self.send(|c| c.post(self.url("/api/auth/logout"))).await?;
    Ok(())
  }

  /// `GET /api/auth/me`
  async fn current_user(&self) -> Result<Option<User>, ApiError> {
    let response: AuthResponse = self.send(|c| c.get(self.url("/api/auth/me"))).await?;
    Ok(response.user)
  }
}
