//! Unified error types for the spaceship API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Unified error type for the service.
#[derive(Error, Debug)]
pub enum SpaceshipError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Matrix generation or product error.
    #[error("matrix error: {0}")]
    Matrix(#[from] MatrixError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the vector primitives behind `/matrices`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// Dot product operands differ in length.
    #[error("length mismatch: left has {left} elements, right has {right}")]
    LengthMismatch {
        /// Length of the left operand.
        left: usize,
        /// Length of the right operand.
        right: usize,
    },
}

/// Body returned for any unhandled failure, shaped like the framework default.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable summary; never exposes internals.
    pub detail: &'static str,
}

impl IntoResponse for SpaceshipError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                detail: "Internal Server Error",
            }),
        )
            .into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, SpaceshipError>;
