//! Origin ownership and request dispatch.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::OriginConfig;
use crate::edge::{EdgeEvent, RequestDescriptor, ResponseDescriptor};
use crate::observability::metrics;
use crate::origin::error::{to_error_response, OriginError};
use crate::origin::kind::{classify, OriginKind};
use crate::origin::upstream::UpstreamResult;
use crate::origin::{file, http};

/// The single configured upstream.
///
/// Immutable after construction and safe to share across concurrent
/// resolutions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    base_url: String,
    kind: OriginKind,
}

impl Origin {
    /// Create an origin, classifying `base_url` by prefix.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let kind = classify(&base_url);
        Self::with_kind(base_url, kind)
    }

    /// Create an origin with an explicit kind.
    ///
    /// File origins have their base directory made absolute.
    pub fn with_kind(base_url: impl Into<String>, kind: OriginKind) -> Self {
        let mut base_url = base_url.into();
        if kind == OriginKind::File {
            base_url = absolute_dir(&base_url).to_string_lossy().into_owned();
        }
        Self { base_url, kind }
    }

    /// Build from the `[origin]` configuration section.
    pub fn from_config(config: &OriginConfig) -> Self {
        match config.kind.as_deref() {
            Some(kind) => Self::with_kind(config.base_url.clone(), OriginKind::parse(kind)),
            None => Self::new(config.base_url.clone()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn kind(&self) -> &OriginKind {
        &self.kind
    }

    /// Fetch the upstream resource for `request`.
    pub async fn resolve(&self, request: &RequestDescriptor) -> Result<UpstreamResult, OriginError> {
        match &self.kind {
            OriginKind::File => {
                let result = file::fetch(Path::new(&self.base_url), &request.uri).await?;
                Ok(UpstreamResult::File(result))
            }
            OriginKind::Http => {
                let result = http::fetch(&self.base_url, http::Scheme::Http, request).await?;
                Ok(UpstreamResult::Http(result))
            }
            OriginKind::Https => {
                let result = http::fetch(&self.base_url, http::Scheme::Https, request).await?;
                Ok(UpstreamResult::Http(result))
            }
            OriginKind::Noop => Err(OriginError::NotFound(
                "Origin is configured as \"noop\"".to_string(),
            )),
            OriginKind::Unsupported(name) => Err(OriginError::InternalServerError(format!(
                "Unsupported origin type \"{}\" (expected \"http\", \"https\" or \"file\")",
                name
            ))),
        }
    }

    /// Resolve `request` into a response descriptor. Never fails.
    pub async fn retrieve(&self, request: &RequestDescriptor) -> ResponseDescriptor {
        let start = Instant::now();

        let response = match self.resolve(request).await {
            Ok(UpstreamResult::Http(result)) => {
                tracing::debug!(
                    status = ?result.status,
                    header_count = result.headers.len(),
                    body_length = result.body.len(),
                    "Upstream response"
                );
                ResponseDescriptor::from(result)
            }
            Ok(result) => {
                let response = ResponseDescriptor::from(result);
                tracing::debug!(
                    body_encoding = response.body_encoding.as_str(),
                    body_length = response.body.len(),
                    "File response"
                );
                response
            }
            Err(err) => {
                if err.is_classified() {
                    tracing::warn!(origin = %self.kind, uri = %request.uri, error = %err, "Resolution failed");
                } else {
                    tracing::error!(origin = %self.kind, uri = %request.uri, error = %err, "Upstream failure");
                }
                to_error_response(&err)
            }
        };

        metrics::record_resolution(self.kind.as_str(), &response.status, start);
        response
    }

    /// Resolve the request carried by an edge event.
    pub async fn retrieve_event(&self, event: &EdgeEvent) -> ResponseDescriptor {
        match event.request() {
            Some(request) => self.retrieve(request).await,
            None => {
                let start = Instant::now();
                let response = to_error_response(&OriginError::InternalServerError(
                    "Edge event carries no request record".to_string(),
                ));
                tracing::warn!(origin = %self.kind, "Edge event without request");
                metrics::record_resolution(self.kind.as_str(), &response.status, start);
                response
            }
        }
    }
}

impl Default for Origin {
    fn default() -> Self {
        Self::new("")
    }
}

fn absolute_dir(base: &str) -> PathBuf {
    std::path::absolute(base).unwrap_or_else(|_| PathBuf::from(base))
}
