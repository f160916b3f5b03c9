//! Greeting and random dot-product HTTP API.
//!
//! Two routes are mounted under a configurable prefix (default `/api`):
//!
//! ```text
//! GET /api           -> {"msg": "Hello, World!"}
//! GET /api/matrices  -> {"matrix_a": [..100], "matrix_b": [..100], "product": n}
//! ```
//!
//! Both vectors hold integers drawn uniformly from `[0, 128)` by a single
//! process-wide random source; `product` is their dot product.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`matrix`]: Vector generation and dot product
//! - [`api`]: HTTP handlers, routes and OpenAPI document
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod matrix;
pub mod metrics;
pub mod utils;

pub use config::Config;
pub use error::{Result, SpaceshipError};
