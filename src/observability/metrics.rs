//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gatewall_evaluations_total` (counter): evaluations by verdict label
//! - `gatewall_evaluation_duration_seconds` (histogram): dispatch latency,
//!   including timed-out dispatches at their deadline
//! - `gatewall_requests_blocked_total` (counter): requests answered 403

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its scrape endpoint.
///
/// Failure to install leaves the process running with recording
/// disabled; the macros below are no-ops without a recorder.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(error) => tracing::error!(%error, "Failed to install metrics exporter"),
    }
}

/// Record one evaluation dispatch and its latency.
pub fn record_evaluation(verdict: &'static str, started: Instant) {
    metrics::counter!("gatewall_evaluations_total", "verdict" => verdict).increment(1);
    metrics::histogram!("gatewall_evaluation_duration_seconds")
        .record(started.elapsed().as_secs_f64());
}

/// Record a request answered with 403.
pub fn record_blocked() {
    metrics::counter!("gatewall_requests_blocked_total").increment(1);
}
