//! Metrics collection and exposition.
//!
//! # Metrics
//! - `origin_resolutions_total` (counter): resolutions by origin kind, status
//! - `origin_resolution_duration_seconds` (histogram): resolution latency

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished resolution.
pub fn record_resolution(origin: &str, status: &str, start: Instant) {
    let origin = origin.to_string();
    metrics::counter!(
        "origin_resolutions_total",
        "origin" => origin.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("origin_resolution_duration_seconds", "origin" => origin)
        .record(start.elapsed().as_secs_f64());
}
