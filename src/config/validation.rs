//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (limits > 0, addresses parse)
//! - Check remote origin URLs have a host
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ShimConfig → Result<(), Vec<ValidationError>>
//! - Unknown explicit origin kinds are accepted; they resolve to 500s

use std::fmt;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::ShimConfig;
use crate::origin::{classify, OriginKind};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ShimConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::new("listener.max_body_bytes", "must be > 0"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be > 0"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    let base_url = &config.origin.base_url;
    if matches!(classify(base_url), OriginKind::Http | OriginKind::Https) {
        match Url::parse(base_url) {
            Ok(url) if url.host_str().is_some() => {}
            Ok(_) => errors.push(ValidationError::new("origin.base_url", "URL has no host")),
            Err(e) => errors.push(ValidationError::new(
                "origin.base_url",
                format!("'{}' is not a valid URL: {}", base_url, e),
            )),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
