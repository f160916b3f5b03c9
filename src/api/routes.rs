//! HTTP API route definitions.

use axum::{routing::get, Json, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::docs;
use super::handlers::{health, hello_world, matrices, prometheus, ready, AppState};
use crate::config::Config;

/// Create the API router.
pub fn create_router(state: AppState, config: &Config) -> Router {
    let doc = docs::openapi(&config.api_prefix);

    let mut router = Router::new()
        // API endpoints
        .route(&config.greeting_path(), get(hello_world))
        .route(&config.matrices_path(), get(matrices))
        // Health endpoints
        .route("/health", get(health))
        .route("/ready", get(ready))
        // Observability
        .route("/metrics", get(prometheus))
        .route(
            "/openapi.json",
            get(move || {
                let doc = doc.clone();
                async move { Json(doc) }
            }),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config.cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
}
