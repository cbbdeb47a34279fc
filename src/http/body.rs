//! Body-buffering middleware.
//!
//! # Responsibilities
//! - Buffer the raw body of POST requests, whatever their content type
//! - Normalize it into a [`RequestBody`] stored in request extensions
//! - Enforce the configured body size limit
//!
//! Other methods pass through untouched.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header::CONTENT_LENGTH, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::edge::RequestBody;

/// Buffered POST body attached to the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferedBody(pub RequestBody);

/// Maximum number of body bytes buffered.
#[derive(Debug, Clone, Copy)]
pub struct BodyLimit(pub usize);

pub async fn buffer_post_body(
    State(limit): State<BodyLimit>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::POST {
        return next.run(request).await;
    }

    let declared = request
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if declared.is_some_and(|len| len > limit.0) {
        tracing::warn!(declared = ?declared, limit = limit.0, "Request body exceeds limit");
        return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
    }

    let (mut parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, limit.0).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to buffer request body");
            return (StatusCode::BAD_REQUEST, "Failed to read request body").into_response();
        }
    };

    parts
        .extensions
        .insert(BufferedBody(RequestBody::from_bytes(&bytes)));
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}
