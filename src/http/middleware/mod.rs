//! Request middleware applied around routing.

pub mod cookies;
pub mod preprocess;

pub use cookies::cookie_middleware;
pub use preprocess::preprocess_middleware;
