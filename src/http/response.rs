//! Edge response descriptor → HTTP response.
//!
//! # Design Decisions
//! - Unparseable status strings become 500
//! - Hop-by-hop and framing headers are dropped; hyper re-frames the body
//! - base64 bodies are decoded back to the original bytes

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, StatusCode},
    response::Response,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::edge::{BodyEncoding, ResponseDescriptor};
use crate::origin::{to_error_response, OriginError};

const DROPPED_HEADERS: &[&str] = &["connection", "keep-alive", "transfer-encoding", "content-length"];

/// Render a descriptor as an HTTP response.
pub fn into_http_response(descriptor: ResponseDescriptor) -> Response {
    let body = match descriptor.body_encoding {
        BodyEncoding::Text => descriptor.body.clone().into_bytes(),
        BodyEncoding::Base64 => match STANDARD.decode(&descriptor.body) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(error = %e, "Response body is not valid base64");
                let err = OriginError::InternalServerError("Malformed response body".to_string());
                return into_http_response(to_error_response(&err));
            }
        },
    };

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = descriptor
        .status_code()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let headers = response.headers_mut();
    for (name, entries) in &descriptor.headers {
        if DROPPED_HEADERS.contains(&name.as_str()) {
            continue;
        }
        let Ok(header_name) = HeaderName::from_bytes(name.as_bytes()) else {
            tracing::warn!(header = %name, "Skipping invalid response header");
            continue;
        };
        for entry in entries {
            match HeaderValue::from_str(&entry.value) {
                Ok(value) => {
                    headers.append(header_name.clone(), value);
                }
                Err(_) => tracing::warn!(header = %name, "Skipping invalid response header value"),
            }
        }
    }

    response
}
