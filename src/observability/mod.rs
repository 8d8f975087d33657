//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID rides on request and response headers for correlation
//! - Metrics are cheap (atomic increments)
//! - The metrics exporter is opt-in per config

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
