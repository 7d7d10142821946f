//! Client-visible errors
//!
//! Every failure a handler can report maps to one [`ApiError`] variant. The
//! message is the short string clients see; internal error types are never
//! serialized into responses.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request body")]
    InvalidBody,

    #[error("Invalid document ID")]
    InvalidDocumentId,

    #[error("Invalid filename")]
    InvalidFilename,

    #[error("PDF not found")]
    NotFound,

    #[error("Failed to open PDF")]
    OpenFailed(#[source] StoreError),

    #[error("URL parameter required")]
    MissingUrl,

    #[error("Domain not allowed")]
    DomainNotAllowed,

    #[error("Failed to fetch PDF: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Failed to fetch PDF: status {0}")]
    UpstreamStatus(u16),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody
            | ApiError::InvalidDocumentId
            | ApiError::InvalidFilename
            | ApiError::MissingUrl => StatusCode::BAD_REQUEST,
            ApiError::DomainNotAllowed => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::OpenFailed(_) | ApiError::Fetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::UpstreamStatus(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Plain-text rendering, used by the binary endpoints
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

/// JSON rendering of an [`ApiError`]
#[derive(Debug)]
pub struct JsonError(pub ApiError);

impl From<ApiError> for JsonError {
    fn from(err: ApiError) -> Self {
        JsonError(err)
    }
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        (
            self.0.status(),
            [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}
