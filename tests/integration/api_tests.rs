//! API integration tests

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use book_api::{api, repository::Repository, services::Services, AppState};

const BOOKS: &str = "/api/books";

/// Router backed by a fresh in-memory store
fn app() -> Router {
    api::router(AppState {
        services: Arc::new(Services::new(Repository::in_memory())),
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("Failed to send request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, body)
}

async fn get_books(app: &Router) -> (StatusCode, Value) {
    send(app, Request::builder().uri(BOOKS).body(Body::empty()).unwrap()).await
}

async fn post_raw(app: &Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(BOOKS)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn post_book(app: &Router, book: Value) -> (StatusCode, Value) {
    post_raw(app, &book.to_string()).await
}

#[tokio::test]
async fn test_create_book() {
    let app = app();

    let (status, body) = post_book(&app, json!({"title": "New Book", "author": "John Doe"})).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"id": 1, "title": "New Book", "author": "John Doe"}));
}

#[tokio::test]
async fn test_list_books_after_create() {
    let app = app();
    let (status, _) = post_book(&app, json!({"title": "New Book", "author": "John Doe"})).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = get_books(&app).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"id": 1, "title": "New Book", "author": "John Doe"}]));
}

#[tokio::test]
async fn test_list_books_when_empty() {
    let app = app();

    let (status, body) = get_books(&app).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_list_matches_every_created_book() {
    let app = app();
    let inputs = [
        ("Dune", "Frank Herbert"),
        ("Emma", "Jane Austen"),
        ("Ulysses", "James Joyce"),
    ];

    let mut created = Vec::new();
    for (title, author) in inputs {
        let (status, body) = post_book(&app, json!({"title": title, "author": author})).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["id"].as_i64().unwrap() > 0);
        assert_eq!(body["title"], title);
        assert_eq!(body["author"], author);
        created.push(body);
    }

    let (status, body) = get_books(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Array(created));
}

#[tokio::test]
async fn test_repeated_list_is_stable() {
    let app = app();
    post_book(&app, json!({"title": "Dune", "author": "Frank Herbert"})).await;

    let (_, first) = get_books(&app).await;
    let (_, second) = get_books(&app).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_create_book_with_blank_title() {
    let app = app();

    let (status, body) = post_book(&app, json!({"title": "", "author": "John Doe"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "type": "about:blank",
            "title": "Bad Request",
            "status": 400,
            "instance": "/api/books",
            "fieldErrors": [{"field": "title", "message": "must not be blank"}]
        })
    );
}

#[tokio::test]
async fn test_create_book_with_every_field_blank() {
    let app = app();

    let (status, body) = post_book(&app, json!({"title": "   ", "author": null})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("errors").is_none());
    assert_eq!(
        body["fieldErrors"],
        json!([
            {"field": "author", "message": "must not be blank"},
            {"field": "title", "message": "must not be blank"}
        ])
    );
}

#[tokio::test]
async fn test_rejected_book_is_not_stored() {
    let app = app();
    post_book(&app, json!({"author": "John Doe"})).await;

    let (status, _) = get_books(&app).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_is_overwritten() {
    let app = app();

    let (status, body) =
        post_book(&app, json!({"id": 42, "title": "New Book", "author": "John Doe"})).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn test_malformed_json() {
    let app = app();

    let (status, body) = post_raw(&app, r#"{"title": "New Book""#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_eq!(body["instance"], "/api/books");
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_create_book_with_wrong_content_type() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri(BOOKS)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"title": "New Book", "author": "John Doe"}"#))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["status"], 415);
    assert_eq!(body["title"], "Unsupported Media Type");
    assert_eq!(body["instance"], "/api/books");
}

#[tokio::test]
async fn test_create_book_without_content_type() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri(BOOKS)
        .body(Body::from(r#"{"title": "New Book", "author": "John Doe"}"#))
        .unwrap();

    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let (status, _) = get_books(&app).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = app();

    let (status, body) = send(
        &app,
        Request::builder().uri("/api-docs/openapi.json").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/books"]["post"].is_object());
}
