//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): proxied requests by method, status
//! - `gateway_request_duration_seconds` (histogram): proxy latency
//! - `gateway_upstream_errors_total` (counter): transport-level failures
//! - `gateway_payment_intents_total` (counter): payment attempts by outcome

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "failed to install metrics exporter"),
    }
}

/// Record one proxied request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    counter!(
        "gateway_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);
    histogram!("gateway_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record an upstream transport failure.
pub fn record_upstream_error() {
    counter!("gateway_upstream_errors_total").increment(1);
}

/// Record a payment-intent attempt by outcome.
pub fn record_payment_intent(outcome: &'static str) {
    counter!("gateway_payment_intents_total", "outcome" => outcome).increment(1);
}
