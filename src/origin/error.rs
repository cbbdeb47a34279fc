//! Origin errors and their mapping onto error responses.

use thiserror::Error;

use crate::edge::ResponseDescriptor;

const INTERNAL_SERVER_ERROR: (u16, &str) = (500, "Internal Server Error");
const NOT_FOUND: (u16, &str) = (404, "Not Found");

/// Errors raised while resolving a request against an origin.
#[derive(Debug, Error)]
pub enum OriginError {
    /// Missing file, non-file path, or a no-op origin.
    #[error("{0}")]
    NotFound(String),

    /// Unusable origin configuration or request.
    #[error("{0}")]
    InternalServerError(String),

    /// Unclassified filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unclassified network failure (refused, reset, DNS).
    #[error("Upstream transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Origin base URL that cannot be parsed or has no host.
    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl OriginError {
    /// HTTP status carried by classified errors.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            OriginError::NotFound(_) => Some(NOT_FOUND.0),
            OriginError::InternalServerError(_) => Some(INTERNAL_SERVER_ERROR.0),
            _ => None,
        }
    }

    /// Reason phrase carried by classified errors.
    pub fn reason_phrase(&self) -> Option<&'static str> {
        match self {
            OriginError::NotFound(_) => Some(NOT_FOUND.1),
            OriginError::InternalServerError(_) => Some(INTERNAL_SERVER_ERROR.1),
            _ => None,
        }
    }

    pub fn is_classified(&self) -> bool {
        self.status_code().is_some()
    }
}

/// Convert any resolution failure into a well-formed JSON error response.
pub fn to_error_response(err: &OriginError) -> ResponseDescriptor {
    let code = err.status_code().unwrap_or(INTERNAL_SERVER_ERROR.0);
    let reason = err.reason_phrase().unwrap_or(INTERNAL_SERVER_ERROR.1);
    let body = serde_json::json!({
        "code": code,
        "message": err.to_string(),
    });

    ResponseDescriptor::json_text(code, reason, body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::BodyEncoding;

    #[test]
    fn not_found_maps_to_404() {
        let response = to_error_response(&OriginError::NotFound("File /x does not exist".into()));

        assert_eq!(response.status, "404");
        assert_eq!(response.status_description.as_deref(), Some("Not Found"));
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.body_encoding, BodyEncoding::Text);

        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["code"], 404);
        assert_eq!(body["message"], "File /x does not exist");
    }

    #[test]
    fn unclassified_errors_default_to_500() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let response = to_error_response(&OriginError::from(io));

        assert_eq!(response.status, "500");
        assert_eq!(
            response.status_description.as_deref(),
            Some("Internal Server Error")
        );
        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["code"], 500);
        assert!(body["message"].as_str().unwrap().contains("denied"));
    }

    #[test]
    fn classification() {
        assert!(OriginError::NotFound(String::new()).is_classified());
        assert!(OriginError::InternalServerError(String::new()).is_classified());
        assert!(!OriginError::from(url::ParseError::EmptyHost).is_classified());
    }
}
