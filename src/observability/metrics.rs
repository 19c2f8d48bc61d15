//! Metrics collection and exposition.
//!
//! # Metrics
//! - `vanity_requests_total` (counter): requests by outcome and status
//! - `vanity_request_duration_seconds` (histogram): handling latency
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Prometheus exporter is opt-in (`server.metrics_enabled`)

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::StatusCode;
use metrics_exporter_prometheus::PrometheusBuilder;

/// How a request was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Vanity,
    Index,
    NotFound,
    RenderError,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Vanity => "vanity",
            Outcome::Index => "index",
            Outcome::NotFound => "not_found",
            Outcome::RenderError => "render_error",
        }
    }
}

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), metrics_exporter_prometheus::BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one handled request.
pub fn record_request(outcome: Outcome, status: StatusCode, start: Instant) {
    let labels = [
        ("outcome", outcome.as_str().to_string()),
        ("status", status.as_u16().to_string()),
    ];
    metrics::counter!("vanity_requests_total", &labels).increment(1);
    metrics::histogram!("vanity_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}
