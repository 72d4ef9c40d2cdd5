//! REST surface tests: status codes, Location headers and problem bodies

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use commerce_service::api::rest::routes::register_routes;
use commerce_service::{CommerceServiceModule, Config};
use common::*;
use sea_orm::{ConnectOptions, Database};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app(store: &InMemoryStore) -> Router {
    register_routes(Router::new(), Arc::new(create_test_service(store)))
}

/// Router over the SeaORM module on a migrated, seeded in-memory SQLite database
async fn sqlite_app() -> Router {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("Failed to open sqlite");
    let config = Config {
        seed_demo_data: true,
        ..Default::default()
    };
    CommerceServiceModule::migrate(&db, &config)
        .await
        .expect("Failed to migrate");

    CommerceServiceModule::init(db, config).register_rest(Router::new())
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, header::HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, json)
}

#[tokio::test]
async fn test_create_order_returns_created_with_location() {
    print_test_header(
        "test_create_order_returns_created_with_location",
        &["POST /api/orders for client 7", "Expected: 201, Location header, resolved body"],
    );
    let store = InMemoryStore::with_catalog();
    let app = app(&store);

    let (status, headers, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({
            "client": { "id": CLIENT_ID },
            "items": [
                { "product": { "id": BOOK_ID }, "quantity": 2 },
                { "product": { "id": LAMP_ID }, "quantity": 1, "price": "9.99" }
            ]
        })),
    )
    .await;
    println!("Response: {}", body);

    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().expect("order id");
    assert_eq!(
        headers.get(header::LOCATION).unwrap(),
        format!("/api/orders/{}", id).as_str()
    );
    assert_eq!(body["orderStatus"], "WAITING_PAYMENT");
    assert_eq!(body["client"]["id"], CLIENT_ID);
    assert_eq!(body["client"]["name"], "Maria Brown");
    assert!(body.get("payment").is_none());
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["items"][0]["price"], "19.90");
    assert_eq!(body["items"][1]["price"], "9.99");
    assert_eq!(body["total"], "49.79");

    let (status, _, fetched) = send(&app, Method::GET, &format!("/api/orders/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn test_create_order_unknown_client_is_problem_404() {
    let store = InMemoryStore::with_catalog();
    let app = app(&store);

    let (status, headers, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({
            "client": { "id": 999 },
            "items": [{ "product": { "id": BOOK_ID }, "quantity": 1 }]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        headers.get(header::CONTENT_TYPE).unwrap(),
        "application/problem+json"
    );
    assert_eq!(body["status"], 404);
    assert_eq!(body["title"], "Resource Not Found");
    assert_eq!(body["detail"], "user not found. Id 999");
    assert_eq!(body["instance"], "/api/orders");
    assert_eq!(store.order_count(), 0);
}

#[tokio::test]
async fn test_create_order_without_client_is_bad_request() {
    let store = InMemoryStore::with_catalog();
    let app = app(&store);

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({ "items": [{ "product": { "id": BOOK_ID }, "quantity": 1 }] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "client id is required");
}

#[tokio::test]
async fn test_order_update_and_delete() {
    let store = InMemoryStore::with_catalog();
    let app = app(&store);

    let (_, _, created) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({ "client": { "id": CLIENT_ID }, "items": [] })),
    )
    .await;
    let uri = format!("/api/orders/{}", created["id"]);

    let (status, _, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({
            "moment": "2024-01-02T03:04:05Z",
            "orderStatus": "PAID",
            "client": { "id": OTHER_CLIENT_ID },
            "payment": { "moment": "2024-01-02T04:00:00Z" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["orderStatus"], "PAID");
    assert_eq!(updated["client"]["id"], OTHER_CLIENT_ID);
    assert_eq!(updated["payment"]["id"], created["id"]);

    let (status, _, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["instance"], uri);
}

#[tokio::test]
async fn test_delete_order_with_items_is_database_error() {
    let store = InMemoryStore::with_catalog();
    let app = app(&store);

    let (_, _, created) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({
            "client": { "id": CLIENT_ID },
            "items": [{ "product": { "id": BOOK_ID }, "quantity": 1 }]
        })),
    )
    .await;

    let (status, _, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/orders/{}", created["id"]),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Database Error");
    assert_eq!(store.order_count(), 1);
}

#[tokio::test]
async fn test_category_endpoints() {
    let store = InMemoryStore::with_catalog();
    let app = app(&store);

    let (status, headers, created) = send(
        &app,
        Method::POST,
        "/api/categories",
        Some(json!({ "name": "Garden" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/categories/{}", created["id"]);
    assert_eq!(headers.get(header::LOCATION).unwrap(), uri.as_str());

    let (status, _, renamed) =
        send(&app, Method::PUT, &uri, Some(json!({ "name": "Outdoor" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "Outdoor");

    let (status, _, all) = send(&app, Method::GET, "/api/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (status, _, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["detail"],
        format!("category not found. Id {}", created["id"])
    );
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let store = InMemoryStore::new();
    let app = app(&store);

    let (status, _, doc) = send(&app, Method::GET, "/api/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/api/orders").is_some());
    assert!(doc["paths"].get("/api/orders/{id}").is_some());
    assert!(doc["paths"].get("/api/categories/{id}").is_some());
}

#[tokio::test]
async fn test_sqlite_delete_order_with_items_is_database_error() {
    print_test_header(
        "test_sqlite_delete_order_with_items_is_database_error",
        &[
            "DELETE an order that still has item rows, backed by SQLite",
            "Expected: 400 Database Error carrying the foreign key message",
        ],
    );
    let app = sqlite_app().await;

    let (status, _, created) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({
            "client": { "id": 1 },
            "items": [{ "product": { "id": 1 }, "quantity": 1 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/orders/{}", created["id"]);

    let (status, headers, body) = send(&app, Method::DELETE, &uri, None).await;
    println!("Response: {}", body);

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        headers.get(header::CONTENT_TYPE).unwrap(),
        "application/problem+json"
    );
    assert_eq!(body["title"], "Database Error");
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("FOREIGN KEY constraint failed"));
    assert_eq!(body["instance"], uri);

    let (status, _, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
}
