//! HTTP request → edge request descriptor.

use axum::http::Request;

use crate::edge::{EdgeHeaders, HeaderEntry, RequestDescriptor};
use crate::http::body::BufferedBody;

/// Describe an inbound request the way the edge would hand it over.
///
/// Only POST requests carry a body, as buffered by
/// [`buffer_post_body`](crate::http::body::buffer_post_body).
pub fn to_descriptor<B>(request: &Request<B>) -> RequestDescriptor {
    let uri = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());

    let mut headers = EdgeHeaders::new();
    for (name, value) in request.headers() {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        headers
            .entry(name.as_str().to_string())
            .or_default()
            .push(HeaderEntry::keyed(name.as_str(), value));
    }

    RequestDescriptor {
        method: request.method().as_str().to_string(),
        uri,
        headers,
        body: request
            .extensions()
            .get::<BufferedBody>()
            .map(|buffered| buffered.0.clone()),
    }
}
