//! Notification service
//!
//! Stateless stub returning a fixed list of notifications. It runs as its own
//! binary (`notification_service`) and shares nothing with the PDF service
//! beyond logging setup.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::middleware::log_requests;
use crate::model::Notification;

/// `GET /health` and `GET /notifications`
pub fn create_app() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/notifications", get(list_notifications))
        .layer(axum::middleware::from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "Notification Service"
    }))
}

async fn list_notifications() -> Json<Vec<Notification>> {
    Json(canned_notifications())
}

fn canned_notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: "1".to_string(),
            message: "You have a new message".to_string(),
        },
        Notification {
            id: "2".to_string(),
            message: "Your request has been approved".to_string(),
        },
    ]
}
