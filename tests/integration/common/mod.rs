//! Common test utilities for integration tests
//!
//! Builds the composed application router and provides request/response
//! helpers plus fixtures for categories and posts.

use anyhow::Result;
use axum::{
    body::Body,
    http::{Method, Request, Response, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Fresh application with empty in-memory stores
pub fn app() -> Router {
    pressroom_app::create_app()
}

/// Build a request, JSON body optional
pub fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);

    if let Some(b) = body {
        builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&b).unwrap()))
            .unwrap()
    } else {
        builder.body(Body::empty()).unwrap()
    }
}

/// Send a request through the router
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Response<Body> {
    app.clone()
        .oneshot(request(method, uri, body))
        .await
        .unwrap()
}

/// Parse response body as JSON
pub async fn parse_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Create a category and return its id
pub async fn create_category(app: &Router, name: &str) -> Result<u64> {
    let resp = send(
        app,
        Method::POST,
        "/v1/categories",
        Some(json!({"name": name})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = parse_body(resp).await;
    Ok(body["id"].as_u64().unwrap())
}

/// Create a post and return its response body
pub async fn create_post(
    app: &Router,
    title: &str,
    author: &str,
    body_text: &str,
    category_ids: &[u64],
) -> Result<Value> {
    let resp = send(
        app,
        Method::POST,
        "/v1/posts",
        Some(json!({
            "title": title,
            "author": author,
            "body": body_text,
            "category_ids": category_ids,
        })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    Ok(parse_body(resp).await)
}

/// Create a post with standard fixture content
pub async fn create_default_post(app: &Router, category_ids: &[u64]) -> Result<Value> {
    create_post(
        app,
        "Ein Test-Beitrag",
        "Frau Müller",
        "Das ist der Inhalt des Test-Beitrags",
        category_ids,
    )
    .await
}
