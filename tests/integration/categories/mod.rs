//! Category API integration tests

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{app, create_category, create_default_post, parse_body, send};

#[tokio::test]
async fn test_create_category_returns_201() {
    let app = app();
    let resp = send(
        &app,
        Method::POST,
        "/v1/categories",
        Some(json!({"name": "Technik", "description": "Technik-Themen"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = parse_body(resp).await;
    assert_eq!(body["name"], "Technik");
    assert_eq!(body["description"], "Technik-Themen");
    assert!(body["id"].as_u64().unwrap() >= 1);
}

#[tokio::test]
async fn test_create_category_empty_name_returns_400() {
    let app = app();
    let resp = send(
        &app,
        Method::POST,
        "/v1/categories",
        Some(json!({"name": ""})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_and_list_categories() {
    let app = app();
    let id = create_category(&app, "Technik").await.unwrap();
    create_category(&app, "Reisen").await.unwrap();

    let resp = send(&app, Method::GET, &format!("/v1/categories/{}", id), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(parse_body(resp).await["name"], "Technik");

    let resp = send(&app, Method::GET, "/v1/categories", None).await;
    let body = parse_body(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_unknown_category_returns_404() {
    let app = app();
    let resp = send(&app, Method::GET, "/v1/categories/42", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body = parse_body(resp).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_update_and_patch_category() {
    let app = app();
    let id = create_category(&app, "Technik").await.unwrap();

    let resp = send(
        &app,
        Method::PUT,
        &format!("/v1/categories/{}", id),
        Some(json!({"name": "Wissenschaft", "description": "Neu"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(parse_body(resp).await["name"], "Wissenschaft");

    let resp = send(
        &app,
        Method::PATCH,
        &format!("/v1/categories/{}", id),
        Some(json!({"description": "Nur die Beschreibung"})),
    )
    .await;
    let body = parse_body(resp).await;
    assert_eq!(body["name"], "Wissenschaft");
    assert_eq!(body["description"], "Nur die Beschreibung");
}

#[tokio::test]
async fn test_delete_category_then_404() {
    let app = app();
    let id = create_category(&app, "Technik").await.unwrap();

    let resp = send(&app, Method::DELETE, &format!("/v1/categories/{}", id), None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, Method::GET, &format!("/v1/categories/{}", id), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app, Method::DELETE, &format!("/v1/categories/{}", id), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_category_prunes_current_post_versions() {
    let app = app();
    let technik = create_category(&app, "Technik").await.unwrap();
    let reisen = create_category(&app, "Reisen").await.unwrap();
    let post = create_default_post(&app, &[technik, reisen]).await.unwrap();
    let post_id = post["id"].as_u64().unwrap();

    let resp = send(
        &app,
        Method::DELETE,
        &format!("/v1/categories/{}", technik),
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, Method::GET, &format!("/v1/posts/{}", post_id), None).await;
    let body = parse_body(resp).await;
    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["id"].as_u64().unwrap(), reisen);
}
