//! Security response headers.
//!
//! # Responsibilities
//! - Define the fixed protection header set stamped on every response
//!
//! # Design Decisions
//! - The server applies these as overriding layers, so handlers cannot
//!   weaken them
//! - The set is static; anything tunable belongs in config

use axum::http::header::{HeaderName, HeaderValue};

/// Headers applied to every response.
pub fn response_headers() -> [(HeaderName, HeaderValue); 4] {
    [
        (
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("SAMEORIGIN"),
        ),
        (
            HeaderName::from_static("x-xss-protection"),
            HeaderValue::from_static("1; mode=block"),
        ),
        (
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ),
        (
            HeaderName::from_static("x-download-options"),
            HeaderValue::from_static("noopen"),
        ),
    ]
}
