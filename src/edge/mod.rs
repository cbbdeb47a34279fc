//! Edge boundary types and translation.
//!
//! # Data Flow
//! ```text
//! EdgeEvent / inbound HTTP
//!     → request.rs (RequestDescriptor, optional buffered body)
//!     → [origin resolves the request]
//!     → headers.rs (standard header map → multi-value edge headers)
//!     → encoding.rs (text vs base64 body selection)
//!     → response.rs (ResponseDescriptor handed back to the edge)
//! ```
//!
//! # Design Decisions
//! - Field names follow the edge platform's camelCase JSON contract
//! - Every header name maps to a non-empty ordered list of entries
//! - Outbound forwarding keeps only the first value of a header

pub mod encoding;
pub mod event;
pub mod headers;
pub mod request;
pub mod response;

pub use encoding::{encode_body, select_body_encoding, BodyEncoding};
pub use event::{EdgeEvent, EdgeRecord, EdgeRecordPayload};
pub use headers::{
    merge_multi_value, to_multi_value, to_single_value, EdgeHeaders, HeaderEntry, HeaderValues,
    StandardHeaders,
};
pub use request::{RequestBody, RequestDescriptor};
pub use response::ResponseDescriptor;
