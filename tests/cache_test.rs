//! Degraded-cache behavior and the notification service

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use common::{get, post_json, response_json, setup_with_backend};
use pdf_service::cache::RedisCache;
use pdf_service::config::CacheSettings;
use pdf_service::notification;

fn unreachable_redis() -> RedisCache {
    // Nothing listens on port 1
    RedisCache::new(&CacheSettings {
        host: "127.0.0.1".to_string(),
        port: 1,
        max_retries: 1,
        ..CacheSettings::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_resolve_works_with_cache_down() {
    let (app, cache, dir) = setup_with_backend(Arc::new(unreachable_redis()));
    std::fs::write(dir.path().join("offline.pdf"), b"%PDF-1.4").unwrap();

    assert!(!cache.ping().await);

    let payload = json!({"documentId": "offline", "query": ""});
    let response = app
        .oneshot(post_json("/api/get-pdf-url", payload.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response.into_body()).await;
    assert_eq!(body["url"], "http://localhost:8006/api/pdfs/offline.pdf");

    // Both the lookup and the write-back failed and were swallowed
    let stats = cache.stats();
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.writes, 0);
    assert!(stats.errors >= 2);
}

#[tokio::test]
async fn test_not_found_with_cache_down() {
    let (app, _cache, _dir) = setup_with_backend(Arc::new(unreachable_redis()));

    let payload = json!({"documentId": "absent", "query": ""});
    let response = app
        .oneshot(post_json("/api/get-pdf-url", payload.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_warm_up_against_unreachable_server() {
    let redis = unreachable_redis();
    assert_eq!(redis.warm_up(4).await, 0);
}

#[tokio::test]
async fn test_notification_health() {
    let app = notification::create_app();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response.into_body()).await;
    assert_eq!(
        body,
        json!({"status": "healthy", "service": "Notification Service"})
    );
}

#[tokio::test]
async fn test_notification_list() {
    let app = notification::create_app();

    let response = app.oneshot(get("/notifications")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response.into_body()).await;
    assert_eq!(
        body,
        json!([
            {"id": "1", "message": "You have a new message"},
            {"id": "2", "message": "Your request has been approved"}
        ])
    );
}

#[tokio::test]
async fn test_notification_unknown_route() {
    let app = notification::create_app();

    let response = app.oneshot(get("/api/pdfs/a.pdf")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
