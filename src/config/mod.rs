//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     + optional TOML file
//!     + PLINTH__* environment variables
//!     → loader.rs (layer & deserialize)
//!     → blend of caller overrides (once, during assembly)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the override blend is the single
//!   mutation path and completes before the first request
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::AppConfig;
pub use schema::ConfigOverrides;
pub use schema::Environment;
pub use schema::ModuleConfig;
