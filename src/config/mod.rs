//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) + CLI overrides
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ShimConfig (validated, immutable)
//!     → Origin built once and shared via Arc
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the origin never changes at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ListenerConfig, ObservabilityConfig, OriginConfig, ShimConfig, TimeoutConfig};
pub use validation::{validate_config, ValidationError};
