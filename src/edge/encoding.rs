//! Body encoding selection for edge responses.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::edge::headers::StandardHeaders;

/// Content encodings whose bytes are not valid text.
const COMPRESSED_ENCODINGS: &[&str] = &["gzip"];

/// How the `body` string of an edge payload is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyEncoding {
    #[default]
    Text,
    Base64,
}

impl BodyEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyEncoding::Text => "text",
            BodyEncoding::Base64 => "base64",
        }
    }
}

/// Pick the body encoding from the first `content-encoding` value.
///
/// The match is case-sensitive.
pub fn select_body_encoding(headers: &StandardHeaders) -> BodyEncoding {
    let content_encoding = headers
        .get("content-encoding")
        .and_then(|v| v.first())
        .unwrap_or_default();

    if COMPRESSED_ENCODINGS.contains(&content_encoding) {
        BodyEncoding::Base64
    } else {
        BodyEncoding::Text
    }
}

/// Render raw bytes as an edge body string.
pub fn encode_body(body: &[u8], encoding: BodyEncoding) -> String {
    match encoding {
        BodyEncoding::Base64 => STANDARD.encode(body),
        BodyEncoding::Text => String::from_utf8_lossy(body).into_owned(),
    }
}
