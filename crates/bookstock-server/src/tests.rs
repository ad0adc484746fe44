//! Route tests against the seeded in-memory dataset.

use axum::{
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::{AppState, router};

async fn body_json(response: Response) -> Value {
  let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .expect("reading body");
  serde_json::from_slice(&bytes).expect("parsing body")
}

fn get(uri: &str) -> Request<Body> {
  Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
  Request::builder()
    .method(method)
    .uri(uri)
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(serde_json::to_vec(&body).unwrap()))
    .unwrap()
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_books_returns_the_catalog() {
  let app = router(AppState::seeded());
  let response = app.oneshot(get("/api/books")).await.unwrap();

  assert_eq!(response.status(), StatusCode::OK);
  let body = body_json(response).await;
  assert_eq!(body.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn list_books_filters_by_store() {
  let app = router(AppState::seeded());
  let response = app.oneshot(get("/api/books?storeId=3")).await.unwrap();

  let body = body_json(response).await;
  let ids: Vec<i64> = body
    .as_array()
    .unwrap()
    .iter()
    .map(|b| b["id"].as_i64().unwrap())
    .collect();
  assert_eq!(ids, [2]);
}

#[tokio::test]
async fn unknown_book_is_404() {
  let app = router(AppState::seeded());
  let response = app.oneshot(get("/api/books/999")).await.unwrap();
  assert_eq!(response.status(), StatusCode::NOT_FOUND);

  let body = body_json(response).await;
  assert!(body["error"].as_str().unwrap().contains("not found"));
}

// ─── Store view ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn store_books_view_is_denormalized() {
  let app = router(AppState::seeded());
  let response = app.oneshot(get("/api/inventory/1/books")).await.unwrap();

  assert_eq!(response.status(), StatusCode::OK);
  let body = body_json(response).await;
  let rows = body.as_array().unwrap();
  assert_eq!(rows.len(), 2);

  let first = rows.iter().find(|r| r["id"] == json!(1)).unwrap();
  assert_eq!(first["price"], json!(29.99));
  assert_eq!(first["author_name"], json!("Tomas Rivera"));
  assert_eq!(first["inventory_id"], json!(1));
  // Catalog fields are flattened into the row.
  assert_eq!(first["name"], json!("A Winter of Glass"));
}

// ─── Inventory writes ────────────────────────────────────────────────────────

#[tokio::test]
async fn add_then_reprice_then_remove() {
  let state = AppState::seeded();

  let response = router(state.clone())
    .oneshot(json_request(
      "POST",
      "/api/inventory",
      json!({ "store_id": 3, "book_id": 4, "price": 12.5 }),
    ))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::CREATED);
  let created = body_json(response).await;
  assert_eq!(created["id"], json!(6));

  let response = router(state.clone())
    .oneshot(json_request("PUT", "/api/inventory/6", json!({ "price": 14.0 })))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::OK);
  assert_eq!(body_json(response).await["price"], json!(14.0));

  let response = router(state.clone())
    .oneshot(
      Request::builder()
        .method("DELETE")
        .uri("/api/inventory/store/3/book/4")
        .body(Body::empty())
        .unwrap(),
    )
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::OK);
  assert_eq!(body_json(response).await["success"], json!(true));
}

#[tokio::test]
async fn duplicate_inventory_pair_is_409() {
  let app = router(AppState::seeded());
  let response = app
    .oneshot(json_request(
      "POST",
      "/api/inventory",
      json!({ "store_id": 1, "book_id": 1, "price": 5.0 }),
    ))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn negative_price_is_400() {
  let app = router(AppState::seeded());
  let response = app
    .oneshot(json_request(
      "POST",
      "/api/inventory",
      json!({ "store_id": 3, "book_id": 4, "price": -1.0 }),
    ))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn removing_an_unstocked_pair_is_404() {
  let app = router(AppState::seeded());
  let response = app
    .oneshot(
      Request::builder()
        .method("DELETE")
        .uri("/api/inventory/store/1/book/99")
        .body(Body::empty())
        .unwrap(),
    )
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ─── Auth ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn login_rejects_bad_credentials() {
  let app = router(AppState::seeded());
  let response = app
    .oneshot(json_request(
      "POST",
      "/api/auth/login",
      json!({ "username": "admin", "password": "wrong" }),
    ))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_establishes_the_session() {
  let state = AppState::seeded();

  let response = router(state.clone())
    .oneshot(json_request(
      "POST",
      "/api/auth/login",
      json!({ "username": "manager", "password": "manager123" }),
    ))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::OK);
  let body = body_json(response).await;
  assert_eq!(body["success"], json!(true));
  assert_eq!(body["user"]["role"], json!("manager"));
  assert!(!body["token"].as_str().unwrap().is_empty());

  // The session is visible through /me on the same state.
  let response = router(state.clone()).oneshot(get("/api/auth/me")).await.unwrap();
  let body = body_json(response).await;
  assert_eq!(body["user"]["username"], json!("manager"));

  // And cleared by logout.
  let response = router(state.clone())
    .oneshot(
      Request::builder()
        .method("POST")
        .uri("/api/auth/logout")
        .body(Body::empty())
        .unwrap(),
    )
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::OK);

  let response = router(state).oneshot(get("/api/auth/me")).await.unwrap();
  let body = body_json(response).await;
  assert_eq!(body["user"], Value::Null);
}
