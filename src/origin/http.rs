//! Remote HTTP/HTTPS fetcher.
//!
//! # Responsibilities
//! - Build the outbound URL from the origin host and the request path+query
//! - Forward method, first header values, and the buffered body
//! - Buffer the full upstream response
//!
//! # Design Decisions
//! - `Connection: Close` on every fetch; a fresh client per fetch keeps no
//!   idle connections between resolutions
//! - Transport errors are returned as-is; mapping happens in the resolver
//! - Response bodies are not decompressed
//! - Redirects are returned to the edge, never followed

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, CONNECTION, CONTENT_LENGTH, TRANSFER_ENCODING,
};
use reqwest::redirect::Policy;
use reqwest::{Client, Method};
use url::Url;

use crate::edge::{to_single_value, EdgeHeaders, HeaderValues, RequestDescriptor, StandardHeaders};
use crate::origin::error::OriginError;
use crate::origin::upstream::HttpResult;

/// Outbound scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

/// Fetch `request` from the origin at `base_url`.
pub async fn fetch(
    base_url: &str,
    scheme: Scheme,
    request: &RequestDescriptor,
) -> Result<HttpResult, OriginError> {
    let target = target_url(base_url, scheme, &request.uri)?;
    let method = Method::from_bytes(request.method.as_bytes()).map_err(|_| {
        OriginError::InternalServerError(format!("Invalid request method {}", request.method))
    })?;

    let client = Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .redirect(Policy::none())
        .build()?;

    let mut outbound = client
        .request(method, target.clone())
        .headers(outbound_headers(&request.headers));

    if let Some(body) = request.body.as_ref().filter(|b| !b.data.is_empty()) {
        let bytes = body.to_bytes().map_err(|e| {
            OriginError::InternalServerError(format!("Request body is not valid base64: {}", e))
        })?;
        outbound = outbound.body(bytes);
    }

    tracing::debug!(url = %target, method = %request.method, "Fetching from upstream");

    let response = outbound.send().await?;
    let status = response.status().as_u16();
    let headers = standard_headers(response.headers());
    let body = response.bytes().await?.to_vec();

    Ok(HttpResult {
        status: Some(status),
        headers,
        body,
    })
}

/// Origin host and port with the request's path and query.
pub fn target_url(base_url: &str, scheme: Scheme, uri: &str) -> Result<Url, OriginError> {
    let mut target = Url::parse(base_url)?;
    if target.host_str().is_none() {
        return Err(OriginError::InvalidUrl(url::ParseError::EmptyHost));
    }
    target.set_scheme(scheme.as_str()).map_err(|_| {
        OriginError::InternalServerError(format!("Cannot use {} for {}", scheme.as_str(), base_url))
    })?;

    let (path, query) = match uri.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (uri, None),
    };
    target.set_path(path);
    target.set_query(query);
    target.set_fragment(None);

    Ok(target)
}

/// Single-valued outbound headers with `Connection: Close` forced.
///
/// Framing headers are dropped since the body is re-sent from a buffer.
/// Names or values that are not valid HTTP are skipped.
pub fn outbound_headers(edge: &EdgeHeaders) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for (name, values) in to_single_value(edge) {
        let Some(value) = values.first() else { continue };
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                if name == CONTENT_LENGTH || name == TRANSFER_ENCODING {
                    continue;
                }
                headers.insert(name, value);
            }
            _ => tracing::warn!(header = %name, "Skipping invalid request header"),
        }
    }

    headers.insert(CONNECTION, HeaderValue::from_static("Close"));
    headers
}

/// Group raw response headers by name.
pub fn standard_headers(raw: &HeaderMap) -> StandardHeaders {
    raw.keys()
        .map(|name| {
            let mut values: Vec<String> = raw
                .get_all(name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .collect();
            let values = if values.len() == 1 {
                HeaderValues::Single(values.remove(0))
            } else {
                HeaderValues::Multiple(values)
            };
            (name.as_str().to_string(), values)
        })
        .collect()
}
