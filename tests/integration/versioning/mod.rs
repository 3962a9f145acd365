//! Version lifecycle integration tests: status, history, rollback

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use crate::common::{app, create_category, create_default_post, parse_body, send};

async fn set_status(app: &axum::Router, id: u64, status: &str) -> Value {
    let resp = send(
        app,
        Method::PUT,
        &format!("/v1/posts/{}/status", id),
        Some(json!({"status": status})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    parse_body(resp).await
}

async fn history(app: &axum::Router, id: u64) -> Vec<Value> {
    let resp = send(app, Method::GET, &format!("/v1/posts/{}/versions", id), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    parse_body(resp).await.as_array().unwrap().clone()
}

#[tokio::test]
async fn test_status_lifecycle() {
    let app = app();
    let post = create_default_post(&app, &[]).await.unwrap();
    let id = post["id"].as_u64().unwrap();

    let body = set_status(&app, id, "published").await;
    assert_eq!(body["status"], "published");

    let body = set_status(&app, id, "archived").await;
    assert_eq!(body["status"], "archived");

    // No guard rails between statuses, archived can publish again
    let body = set_status(&app, id, "published").await;
    assert_eq!(body["status"], "published");
}

#[tokio::test]
async fn test_invalid_status_returns_400() {
    let app = app();
    let post = create_default_post(&app, &[]).await.unwrap();
    let id = post["id"].as_u64().unwrap();

    let resp = send(
        &app,
        Method::PUT,
        &format!("/v1/posts/{}/status", id),
        Some(json!({"status": "deleted"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_on_unknown_post_returns_404() {
    let app = app();
    let resp = send(
        &app,
        Method::PUT,
        "/v1/posts/42/status",
        Some(json!({"status": "published"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_publishing_new_version_archives_previous() {
    let app = app();
    let post = create_default_post(&app, &[]).await.unwrap();
    let id = post["id"].as_u64().unwrap();

    set_status(&app, id, "published").await;
    send(
        &app,
        Method::PUT,
        &format!("/v1/posts/{}", id),
        Some(json!({"title": "V2", "author": "A", "body": "B"})),
    )
    .await;
    set_status(&app, id, "published").await;

    let versions = history(&app, id).await;
    assert_eq!(versions[0]["status"], "archived");
    assert_eq!(versions[1]["status"], "published");
}

#[tokio::test]
async fn test_history_lists_all_versions_in_order() {
    let app = app();
    let post = create_default_post(&app, &[]).await.unwrap();
    let id = post["id"].as_u64().unwrap();

    for title in ["V2", "V3"] {
        send(
            &app,
            Method::PUT,
            &format!("/v1/posts/{}", id),
            Some(json!({"title": title, "author": "A", "body": "B"})),
        )
        .await;
    }

    let versions = history(&app, id).await;
    let numbers: Vec<u64> = versions
        .iter()
        .map(|v| v["version_number"].as_u64().unwrap())
        .collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(versions[0]["title"], "Ein Test-Beitrag");
    assert_eq!(versions[2]["title"], "V3");
}

#[tokio::test]
async fn test_full_rollback_scenario() {
    // create, replace, publish, roll back to version 1
    let app = app();
    let post = create_default_post(&app, &[]).await.unwrap();
    let id = post["id"].as_u64().unwrap();

    send(
        &app,
        Method::PUT,
        &format!("/v1/posts/{}", id),
        Some(json!({"title": "Zweite Fassung", "author": "Frau Müller", "body": "Neu"})),
    )
    .await;
    set_status(&app, id, "published").await;

    let resp = send(&app, Method::POST, &format!("/v1/posts/{}/rollback/1", id), None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = parse_body(resp).await;
    assert_eq!(body["version_number"], 1);
    assert_eq!(body["status"], "draft");
    assert_eq!(body["title"], "Ein Test-Beitrag");

    // Current pointer moved, history intact, version 2 archived
    let resp = send(&app, Method::GET, &format!("/v1/posts/{}", id), None).await;
    assert_eq!(parse_body(resp).await["version_number"], 1);

    let versions = history(&app, id).await;
    assert_eq!(versions.len(), 2);
    assert_eq!(versions[1]["status"], "archived");

    // A later edit continues the number sequence
    let resp = send(
        &app,
        Method::PUT,
        &format!("/v1/posts/{}", id),
        Some(json!({"title": "Dritte Fassung", "author": "Frau Müller", "body": "Neu"})),
    )
    .await;
    assert_eq!(parse_body(resp).await["version_number"], 3);
}

#[tokio::test]
async fn test_rollback_unknown_version_returns_400_and_keeps_current() {
    let app = app();
    let post = create_default_post(&app, &[]).await.unwrap();
    let id = post["id"].as_u64().unwrap();

    let resp = send(&app, Method::POST, &format!("/v1/posts/{}/rollback/7", id), None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(&app, Method::GET, &format!("/v1/posts/{}", id), None).await;
    assert_eq!(parse_body(resp).await["version_number"], 1);
}

#[tokio::test]
async fn test_rollback_unknown_post_returns_404() {
    let app = app();
    let resp = send(&app, Method::POST, "/v1/posts/42/rollback/1", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rollback_prunes_deleted_categories_from_target_only() {
    let app = app();
    let technik = create_category(&app, "Technik").await.unwrap();
    let reisen = create_category(&app, "Reisen").await.unwrap();
    let post = create_default_post(&app, &[technik, reisen]).await.unwrap();
    let id = post["id"].as_u64().unwrap();

    send(
        &app,
        Method::PUT,
        &format!("/v1/posts/{}", id),
        Some(json!({"title": "V2", "author": "A", "body": "B", "category_ids": [reisen]})),
    )
    .await;
    send(&app, Method::DELETE, &format!("/v1/categories/{}", technik), None).await;

    let resp = send(&app, Method::POST, &format!("/v1/posts/{}/rollback/1", id), None).await;
    let body = parse_body(resp).await;
    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["id"].as_u64().unwrap(), reisen);
    assert_eq!(categories[0]["name"], "Reisen");
}
