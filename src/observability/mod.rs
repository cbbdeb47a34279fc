//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Resolutions and the HTTP layer produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (resolution counters and latency histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through the HTTP trace spans
//! - Recording without an installed exporter is a no-op
//! - Nothing here influences response content

pub mod logging;
pub mod metrics;
