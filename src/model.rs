//! Data models for the PDF hosting service
//!
//! Request/response payloads exchanged with clients. Field names follow the
//! camelCase wire format the frontend already speaks.

use serde::{Deserialize, Serialize};

/// Request payload for resolving a document into a fetchable URL
///
/// # Example
/// ```json
/// {
///   "documentId": "doc42",
///   "query": "torque specification"
/// }
/// ```
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    /// Identifier mapping one-to-one to `{pdfDir}/{documentId}.pdf`
    #[serde(default)]
    pub document_id: String,

    /// Free-text query from the caller
    /// Accepted for compatibility, not used when resolving
    #[serde(default)]
    pub query: String,
}

/// Response returned after successfully resolving a document
///
/// # Example
/// ```json
/// { "url": "http://localhost:8006/api/pdfs/doc42.pdf" }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResolveResponse {
    pub url: String,
}

/// Query parameters for the proxy endpoint
///
/// Query string: `?url=http://127.0.0.1:9999/a.pdf`. Built from the raw
/// pairs so a repeated `url` resolves to its first value.
#[derive(Debug, Default, PartialEq)]
pub struct ProxyParams {
    pub url: Option<String>,
}

impl ProxyParams {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let url = pairs
            .into_iter()
            .find(|(key, _)| key == "url")
            .map(|(_, value)| value);
        Self { url }
    }
}

/// Request payload for the chat placeholder
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub document_id: String,
}

#[derive(Serialize, Debug)]
pub struct ChatResponse {
    pub response: String,
}

impl ChatResponse {
    /// Canned reply echoing the caller's message
    pub fn placeholder(message: &str) -> Self {
        Self {
            response: format!(
                "You asked: \"{}\". This is a placeholder AI response.",
                message
            ),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// A single canned notification returned by the notification service
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: String,
    pub message: String,
}
