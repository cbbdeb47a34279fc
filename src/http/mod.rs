//! HTTP glue around the origin resolver.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → body.rs (buffer POST bodies into the {data} shape)
//!     → request.rs (HTTP request → RequestDescriptor)
//!     → [Origin::retrieve]
//!     → response.rs (ResponseDescriptor → HTTP response)
//!     → Send to client
//! ```

pub mod body;
pub mod request;
pub mod response;
pub mod server;

pub use body::{buffer_post_body, BodyLimit, BufferedBody};
pub use request::to_descriptor;
pub use response::into_http_response;
pub use server::{AppState, HttpServer};
