//! Origin resolution subsystem.
//!
//! # Data Flow
//! ```text
//! RequestDescriptor
//!     → resolver.rs (dispatch on the configured OriginKind)
//!     → file.rs | http.rs (exactly one fetch per request)
//!     → upstream.rs (tagged UpstreamResult → ResponseDescriptor)
//!
//! Any failure along the way:
//!     → error.rs (OriginError → JSON error ResponseDescriptor)
//! ```
//!
//! # Design Decisions
//! - The origin is classified once at construction and never mutated
//! - `retrieve` never fails; every error ends as a ResponseDescriptor
//! - No retries, no pooling, no caching of upstream results

pub mod error;
pub mod file;
pub mod http;
pub mod kind;
pub mod resolver;
pub mod upstream;

pub use error::{to_error_response, OriginError};
pub use kind::{classify, OriginKind};
pub use resolver::Origin;
pub use upstream::{FileResult, HttpResult, UpstreamResult};
