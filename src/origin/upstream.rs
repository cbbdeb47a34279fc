//! Tagged upstream results and their success responses.

use crate::edge::{
    encode_body, select_body_encoding, to_multi_value, ResponseDescriptor, StandardHeaders,
};

/// Result of exactly one upstream fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamResult {
    File(FileResult),
    Http(HttpResult),
}

/// Whole file contents as UTF-8 text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResult {
    pub contents: String,
}

/// A fully buffered HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResult {
    /// Upstream status; absent is treated as 200.
    pub status: Option<u16>,
    pub headers: StandardHeaders,
    pub body: Vec<u8>,
}

impl From<UpstreamResult> for ResponseDescriptor {
    fn from(result: UpstreamResult) -> Self {
        match result {
            UpstreamResult::File(file) => file.into(),
            UpstreamResult::Http(http) => http.into(),
        }
    }
}

impl From<FileResult> for ResponseDescriptor {
    // File responses are always labelled application/json, whatever the file.
    fn from(file: FileResult) -> Self {
        ResponseDescriptor::json_text(200, "OK", file.contents)
    }
}

impl From<HttpResult> for ResponseDescriptor {
    fn from(http: HttpResult) -> Self {
        let body_encoding = select_body_encoding(&http.headers);
        ResponseDescriptor {
            status: http.status.unwrap_or(200).to_string(),
            status_description: None,
            headers: to_multi_value(&http.headers),
            body_encoding,
            body: encode_body(&http.body, body_encoding),
        }
    }
}
