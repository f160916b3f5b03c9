//! Prometheus metrics for request counts and latency.
//!
//! Nothing is recorded unless a recorder is installed; `main` installs the
//! Prometheus recorder and hands its handle to the `/metrics` route.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use strum::{Display, IntoStaticStr};
use tracing::debug;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// Dot product value metric name.
pub const METRIC_MATRIX_PRODUCT: &str = "matrix_product";

/// Endpoint label attached to request metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Endpoint {
    /// `GET <prefix>`.
    Greeting,
    /// `GET <prefix>/matrices`.
    Matrices,
}

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP handler latency in milliseconds"
    );
    describe_counter!(METRIC_HTTP_REQUESTS, "Total number of HTTP requests handled");
    describe_histogram!(
        METRIC_MATRIX_PRODUCT,
        "Dot product returned by the matrices endpoint"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and describe all metrics.
pub fn install_prometheus() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Increment the request counter for `endpoint`.
pub fn inc_http_requests(endpoint: Endpoint) {
    let label: &'static str = endpoint.into();
    counter!(METRIC_HTTP_REQUESTS, "endpoint" => label).increment(1);
}

/// Record a computed dot product.
pub fn record_matrix_product(product: i64) {
    histogram!(METRIC_MATRIX_PRODUCT).record(product as f64);
}

/// RAII guard for timing a handler.
/// Records latency for its endpoint when dropped.
pub struct LatencyTimer {
    start: Instant,
    endpoint: Endpoint,
}

impl LatencyTimer {
    /// Create a new latency timer for the given endpoint.
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            start: Instant::now(),
            endpoint,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let label: &'static str = self.endpoint.into();
        histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => label).record(self.elapsed_ms());
    }
}

/// Count a request to `endpoint` and start timing it.
pub fn track(endpoint: Endpoint) -> LatencyTimer {
    inc_http_requests(endpoint);
    LatencyTimer::new(endpoint)
}
