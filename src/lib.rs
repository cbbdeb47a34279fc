//! Origin resolution shim for an edge request pipeline.
//!
//! Resolves an edge request descriptor against a single configured upstream
//! (a directory or an HTTP/HTTPS origin) and answers with an edge response
//! descriptor, for successes and failures alike.

pub mod config;
pub mod edge;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod origin;

pub use config::ShimConfig;
pub use edge::{RequestDescriptor, ResponseDescriptor};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use origin::Origin;
