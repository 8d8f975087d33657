//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Outgoing response:
//!     → headers.rs (fixed protection header set, applied as layers)
//!     → Send to client
//! ```
//!
//! # Design Decisions
//! - Headers ride on overriding response layers, not handler code
//! - No trust in client input

pub mod headers;

pub use headers::response_headers;
