//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (router assembly, layered middleware)
//!     → request.rs (request ID stamped on the way in)
//!     → middleware/ (preprocess pipeline, cookies; may short-circuit)
//!     → matched route, else fallback.rs (public root resolution)
//!     → error.rs (handler failures collapse to a generic 500)
//!     → Send to client
//! ```

pub mod error;
pub mod fallback;
pub mod middleware;
pub mod request;
pub mod server;

pub use error::{PipelineError, PipelineResult};
pub use request::{RequestId, RequestIdExt, RequestIdLayer, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
