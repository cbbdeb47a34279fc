//! Inbound request descriptor.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::edge::encoding::BodyEncoding;
use crate::edge::headers::EdgeHeaders;

/// A request as handed over by the edge, immutable for one resolution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDescriptor {
    pub method: String,
    /// Path plus optional query string, no scheme or host.
    pub uri: String,
    #[serde(default)]
    pub headers: EdgeHeaders,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
}

impl RequestDescriptor {
    /// Body-less request for `method` and `uri`.
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
            headers: EdgeHeaders::new(),
            body: None,
        }
    }
}

/// A buffered request body in the normalized `{data}` shape.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct RequestBody {
    pub data: String,
    #[serde(default)]
    pub encoding: BodyEncoding,
}

impl RequestBody {
    /// Normalize raw bytes: UTF-8 stays text, anything else is base64.
    pub fn from_bytes(raw: &[u8]) -> Self {
        match std::str::from_utf8(raw) {
            Ok(text) => Self {
                data: text.to_string(),
                encoding: BodyEncoding::Text,
            },
            Err(_) => Self {
                data: STANDARD.encode(raw),
                encoding: BodyEncoding::Base64,
            },
        }
    }

    /// Raw bytes to forward upstream.
    pub fn to_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        match self.encoding {
            BodyEncoding::Text => Ok(self.data.clone().into_bytes()),
            BodyEncoding::Base64 => STANDARD.decode(&self.data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_bodies_stay_text() {
        let body = RequestBody::from_bytes(b"{\"a\":1}");
        assert_eq!(body.encoding, BodyEncoding::Text);
        assert_eq!(body.data, "{\"a\":1}");
    }

    #[test]
    fn binary_bodies_are_base64() {
        let raw = [0xff, 0x00, 0xfe];
        let body = RequestBody::from_bytes(&raw);
        assert_eq!(body.encoding, BodyEncoding::Base64);
        assert_eq!(body.to_bytes().unwrap(), raw.to_vec());
    }

    #[test]
    fn empty_body_is_empty_text() {
        assert_eq!(RequestBody::from_bytes(b""), RequestBody::default());
    }

    #[test]
    fn deserializes_edge_json() {
        let json = r#"{
            "method": "POST",
            "uri": "/submit?x=1",
            "headers": {"host": [{"key": "Host", "value": "example.com"}]},
            "body": {"data": "hello"}
        }"#;
        let request: RequestDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(request.headers["host"][0].key.as_deref(), Some("Host"));
        assert_eq!(request.body.unwrap().encoding, BodyEncoding::Text);
    }
}
