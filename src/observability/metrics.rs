//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): total requests by status and outcome
//! - `proxy_request_duration_seconds` (histogram): latency distribution by
//!   outcome
//!
//! Outcome labels are low-cardinality by construction: `rejected`,
//! `success`, `api_error`, `malformed`, `internal_error`.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own scrape listener.
///
/// Failure to install is logged, not fatal: the proxy serves traffic either
/// way, and the `metrics` macros become no-ops without a recorder.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed invocation.
pub fn record_request(status: u16, outcome: &'static str, start: Instant) {
    let latency = start.elapsed().as_secs_f64();

    metrics::counter!(
        "proxy_requests_total",
        "status" => status.to_string(),
        "outcome" => outcome
    )
    .increment(1);

    metrics::histogram!("proxy_request_duration_seconds", "outcome" => outcome).record(latency);
}
