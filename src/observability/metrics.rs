//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Expose a Prometheus-compatible scrape endpoint
//! - Track request throughput and latency
//!
//! # Metrics
//! - `plinth_requests_total` (counter): responses by method, status
//! - `plinth_request_duration_seconds` (histogram): latency by method
//!
//! # Design Decisions
//! - One recording chokepoint in the preprocess middleware
//! - Low-overhead metric updates (atomic operations)
//! - Recording without an installed exporter is a no-op

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its scrape listener.
///
/// Failure is logged, not fatal. The application serves without
/// metrics rather than refusing to start.
pub fn init_metrics(address: SocketAddr) {
    match PrometheusBuilder::new()
        .with_http_listener(address)
        .install()
    {
        Ok(()) => tracing::info!(address = %address, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished request.
pub fn record_request(method: &str, status: u16, started: Instant) {
    counter!(
        "plinth_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        "plinth_request_duration_seconds",
        "method" => method.to_string()
    )
    .record(started.elapsed().as_secs_f64());
}
