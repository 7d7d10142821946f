//! HTTP request handlers for the PDF hosting service
//!
//! This module implements:
//! - Resolving a document ID into a URL served by this service (cache first)
//! - Streaming local PDF files with path-traversal protection
//! - Proxying PDFs from whitelisted origins
//! - The placeholder chat endpoint

use axum::{
    body::{Body, Bytes},
    extract::{rejection::QueryRejection, Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

use crate::cache::{cache_key, URL_TTL};
use crate::error::{ApiError, JsonError};
use crate::model::{ChatRequest, ChatResponse, HealthResponse, ProxyParams, ResolveRequest, ResolveResponse};
use crate::state::AppState;
use crate::store::is_safe_filename;
use crate::upstream::is_allowed_origin;

const PDF_CONTENT_TYPE: &str = "application/pdf";
const PDF_CACHE_CONTROL: &str = "public, max-age=3600";

/// Liveness probe
///
/// # Response
///
/// ```json
/// { "status": "ok", "service": "pdf-service" }
/// ```
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        service: "pdf-service",
    })
}

/// Resolves a document ID into a URL pointing at [`serve_pdf`]
///
/// This handler:
/// 1. Parses `{"documentId": ..., "query": ...}` from the body
/// 2. Returns the cached URL for `pdf:url:{documentId}` if there is one
/// 3. Otherwise checks `{pdfDir}/{documentId}.pdf` on disk
/// 4. Caches the freshly built URL for one hour and returns it
///
/// # Response
///
/// - **200 OK** - `{"url": "http://localhost:{PORT}/api/pdfs/{documentId}.pdf"}`
/// - **400 Bad Request** - Malformed body, or an ID containing `..` or a path separator
/// - **404 Not Found** - No such file
///
/// The cache is advisory: when it is down every request simply takes the
/// filesystem path.
pub async fn get_pdf_url(State(state): State<AppState>, body: Bytes) -> Result<Response, JsonError> {
    let request: ResolveRequest =
        serde_json::from_slice(&body).map_err(|_| ApiError::InvalidBody)?;

    if !is_safe_filename(&request.document_id) {
        debug!(document_id = %request.document_id, "rejecting unsafe document id");
        return Err(ApiError::InvalidDocumentId.into());
    }

    let key = cache_key(&request.document_id);
    if let Some(url) = state.cache().lookup(&key).await {
        return Ok(json_with_cors(ResolveResponse { url }));
    }

    let path = state
        .store()
        .resolve_path(&request.document_id)
        .ok_or(ApiError::InvalidDocumentId)?;

    if !state.store().exists(&path).await {
        return Err(ApiError::NotFound.into());
    }

    let url = state.public_pdf_url(&format!("{}.pdf", request.document_id));
    state.cache().store(&key, &url, URL_TTL).await;

    Ok(json_with_cors(ResolveResponse { url }))
}

/// Streams `{pdfDir}/{filename}`
///
/// The route captures everything after `/api/pdfs/`, so nested paths reach
/// this handler and are rejected here instead of falling through to a 404.
///
/// # Response
///
/// - **200 OK** - `application/pdf` body, streamed from disk
/// - **400 Bad Request** - `filename` contains `..` or a path separator
/// - **404 Not Found** - No such file
/// - **500 Internal Server Error** - The file exists but could not be opened
pub async fn serve_pdf(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let path = state
        .store()
        .path_for(&filename)
        .ok_or(ApiError::InvalidFilename)?;

    if !state.store().exists(&path).await {
        return Err(ApiError::NotFound);
    }

    let file = state.store().open(&path).await.map_err(|e| {
        warn!(path = %path.display(), error = %e, "failed to open PDF");
        ApiError::OpenFailed(e)
    })?;

    // The file handle lives inside the body stream and is closed when the
    // stream finishes or the response is dropped.
    Ok(pdf_response(Body::from_stream(ReaderStream::new(file))))
}

/// Fetches a PDF from a whitelisted origin and streams it back
///
/// # Query Parameters
///
/// - `url` (required) - Absolute URL whose host is on the proxy whitelist;
///   when repeated, the first occurrence is used
///
/// # Response
///
/// - **200 OK** - Upstream body, streamed as `application/pdf`
/// - **400 Bad Request** - `url` missing or empty
/// - **403 Forbidden** - Host not on the whitelist
/// - **500 Internal Server Error** - Upstream could not be reached
/// - **502 Bad Gateway** - Upstream answered with anything but 200
pub async fn proxy_pdf(
    State(state): State<AppState>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, ApiError> {
    let url = params
        .ok()
        .and_then(|Query(pairs)| ProxyParams::from_pairs(pairs).url)
        .filter(|u| !u.is_empty())
        .ok_or(ApiError::MissingUrl)?;

    if !is_allowed_origin(&url, &state.config().allowed_hosts) {
        warn!(%url, "proxy target not on whitelist");
        return Err(ApiError::DomainNotAllowed);
    }

    let upstream = state.http().get(url.as_str()).send().await.map_err(|e| {
        warn!(%url, error = %e, "proxy fetch failed");
        ApiError::Fetch(e)
    })?;

    let status = upstream.status();
    if status != reqwest::StatusCode::OK {
        warn!(%url, %status, "proxy upstream returned non-200");
        return Err(ApiError::UpstreamStatus(status.as_u16()));
    }

    Ok(pdf_response(Body::from_stream(upstream.bytes_stream())))
}

/// Placeholder chat endpoint; echoes the question back
///
/// # Request Body
///
/// ```json
/// { "message": "What is the torque spec?", "documentId": "doc42" }
/// ```
pub async fn chat(body: Bytes) -> Result<Response, JsonError> {
    let request: ChatRequest = serde_json::from_slice(&body).map_err(|_| ApiError::InvalidBody)?;
    debug!(document_id = %request.document_id, "chat placeholder invoked");

    Ok(json_with_cors(ChatResponse::placeholder(&request.message)))
}

fn json_with_cors<T: Serialize>(payload: T) -> Response {
    ([(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")], Json(payload)).into_response()
}

fn pdf_response(body: Body) -> Response {
    (
        [
            (header::CONTENT_TYPE, PDF_CONTENT_TYPE),
            (header::CACHE_CONTROL, PDF_CACHE_CONTROL),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        body,
    )
        .into_response()
}
