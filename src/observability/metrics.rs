//! Metrics collection and exposition.
//!
//! # Metrics
//! - `segment_requests_total` (counter): requests by method, status, outcome
//! - `segment_request_duration_seconds` (histogram): dispatch latency by method, outcome
//!
//! # Outcomes
//! `handled`, `empty`, `not_found`, `route_error`, `handler_error`, `redirect`

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::StatusCode;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::routing::HttpMethod;

/// Install the Prometheus recorder and its HTTP listener.
///
/// Must be called from inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one dispatched request.
pub fn record_dispatch(method: HttpMethod, status: StatusCode, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "segment_requests_total",
        "method" => method.as_str(),
        "status" => status.as_u16().to_string(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!(
        "segment_request_duration_seconds",
        "method" => method.as_str(),
        "outcome" => outcome
    )
    .record(start.elapsed().as_secs_f64());
}
