//! Outbound response descriptor.
//!
//! The only output shape of a resolution. Success and failure both produce a
//! `ResponseDescriptor`; failures simply carry an error status and JSON body.

use serde::{Deserialize, Serialize};

use crate::edge::encoding::BodyEncoding;
use crate::edge::headers::{EdgeHeaders, HeaderEntry};

/// Content type stamped on file and error responses.
pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDescriptor {
    /// HTTP status, string encoded.
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_description: Option<String>,
    pub headers: EdgeHeaders,
    pub body_encoding: BodyEncoding,
    pub body: String,
}

impl ResponseDescriptor {
    /// Text response with a single `content-type: application/json` header.
    pub fn json_text(status: u16, description: &str, body: String) -> Self {
        Self {
            status: status.to_string(),
            status_description: Some(description.to_string()),
            headers: json_content_type(),
            body_encoding: BodyEncoding::Text,
            body,
        }
    }

    /// Numeric status, if the string parses.
    pub fn status_code(&self) -> Option<u16> {
        self.status.parse().ok()
    }

    /// First value of a header, looked up by lowercase name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|entries| entries.first())
            .map(|entry| entry.value.as_str())
    }
}

fn json_content_type() -> EdgeHeaders {
    let mut headers = EdgeHeaders::new();
    headers.insert(
        "content-type".into(),
        vec![HeaderEntry::keyed("content-type", JSON_CONTENT_TYPE)],
    );
    headers
}
