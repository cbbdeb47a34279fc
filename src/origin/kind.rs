//! Origin classification.

use std::fmt;

/// The kind of upstream an origin fetches from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OriginKind {
    Http,
    Https,
    File,
    /// No backing resource; every resolution is a 404.
    Noop,
    /// An explicitly configured kind this build cannot serve.
    Unsupported(String),
}

impl OriginKind {
    /// Map an explicit kind name from configuration.
    pub fn parse(name: &str) -> Self {
        match name {
            "http" => OriginKind::Http,
            "https" => OriginKind::Https,
            "file" => OriginKind::File,
            "noop" => OriginKind::Noop,
            other => OriginKind::Unsupported(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OriginKind::Http => "http",
            OriginKind::Https => "https",
            OriginKind::File => "file",
            OriginKind::Noop => "noop",
            OriginKind::Unsupported(name) => name,
        }
    }
}

impl fmt::Display for OriginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a base URL by prefix.
///
/// Total over all strings: `http://` and `https://` select remote origins,
/// the empty string selects [`OriginKind::Noop`], anything else is a
/// filesystem path. Never yields [`OriginKind::Unsupported`].
pub fn classify(base_url: &str) -> OriginKind {
    if base_url.is_empty() {
        OriginKind::Noop
    } else if base_url.starts_with("http://") {
        OriginKind::Http
    } else if base_url.starts_with("https://") {
        OriginKind::Https
    } else {
        OriginKind::File
    }
}
