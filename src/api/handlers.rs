//! HTTP API handlers.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::debug;
use utoipa::ToSchema;

use crate::config::Config;
use crate::error::{MatrixError, Result};
use crate::matrix::Matrices;
use crate::metrics::{self, Endpoint};

/// Fixed greeting returned by the root API route.
pub const GREETING: &str = "Hello, World!";

/// Payload of the matrices endpoint.
pub type MatrixResponse = Matrices;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Whether the listener is bound and serving.
    pub ready: Arc<AtomicBool>,
    /// Process-wide random source, seeded once.
    rng: Arc<Mutex<StdRng>>,
    /// Prometheus handle rendered by `/metrics`.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state with an entropy-seeded random source.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create app state whose random source is seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Create app state from configuration.
    pub fn from_config(config: &Config) -> Self {
        match config.rng_seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(),
        }
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            ready: Arc::new(AtomicBool::new(false)),
            rng: Arc::new(Mutex::new(rng)),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` route.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Set ready state.
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Check if ready.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Draw a fresh pair of vectors from the shared random source.
    pub async fn generate_matrices(&self) -> std::result::Result<Matrices, MatrixError> {
        let mut rng = self.rng.lock().await;
        Matrices::generate(&mut *rng)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("ready", &self.is_ready())
            .field("metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}

/// Greeting response.
#[derive(Debug, Serialize, ToSchema)]
pub struct GreetingResponse {
    /// Always "Hello, World!".
    pub msg: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Whether service is ready.
    pub ready: bool,
}

/// Greeting handler.
#[utoipa::path(
    get,
    path = "/",
    tag = "api",
    responses((status = 200, description = "Fixed greeting", body = GreetingResponse))
)]
pub async fn hello_world() -> Json<GreetingResponse> {
    let _timer = metrics::track(Endpoint::Greeting);
    Json(GreetingResponse {
        msg: GREETING.to_string(),
    })
}

/// Matrices handler - two random vectors and their dot product.
#[utoipa::path(
    get,
    path = "/matrices",
    tag = "api",
    responses(
        (status = 200, description = "Two random vectors and their dot product", body = Matrices),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn matrices(State(state): State<AppState>) -> Result<Json<MatrixResponse>> {
    let _timer = metrics::track(Endpoint::Matrices);

    let matrices = state.generate_matrices().await?;
    metrics::record_matrix_product(matrices.product);
    debug!(product = matrices.product, "Generated matrices");

    Ok(Json(matrices))
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Readiness check handler - returns 200 if ready, 503 otherwise.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let is_ready = state.is_ready();
    let response = ReadyResponse { ready: is_ready };

    if is_ready {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}

/// Prometheus exposition - 404 when no recorder is installed.
pub async fn prometheus(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
