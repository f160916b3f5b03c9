//! Application configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};

use serde::Deserialize;

/// Routes mounted outside the API prefix.
const RESERVED_PATHS: [&str; 4] = ["/health", "/ready", "/metrics", "/openapi.json"];

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Mount point of the greeting and matrices routes.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Add a permissive CORS layer.
    #[serde(default)]
    pub cors: bool,

    // === Random Source ===
    /// Seed for the shared random source; entropy when unset.
    #[serde(default)]
    pub rng_seed: Option<u64>,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Emit JSON log lines.
    #[serde(default)]
    pub log_json: bool,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn is_literal_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '~' | '-'))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_prefix: default_api_prefix(),
            cors: false,
            rng_seed: None,
            rust_log: default_log_level(),
            log_json: false,
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("PORT must be non-zero".to_string());
        }

        if self.host.parse::<IpAddr>().is_err() {
            return Err(format!("HOST is not an IP address: {}", self.host));
        }

        let prefix = self.api_prefix.as_str();
        if !prefix.is_empty() {
            if !prefix.starts_with('/') {
                return Err("API_PREFIX must start with /".to_string());
            }
            if prefix.ends_with('/') {
                return Err("API_PREFIX must not end with /".to_string());
            }
            // Captures (`:x`) and wildcards (`*x`) would turn the mount into a pattern.
            if !prefix[1..].split('/').all(is_literal_segment) {
                return Err(format!(
                    "API_PREFIX segments must be non-empty and use only [A-Za-z0-9._~-]: {}",
                    prefix
                ));
            }
        }

        if RESERVED_PATHS.contains(&self.greeting_path().as_str()) {
            return Err(format!("API_PREFIX collides with {}", prefix));
        }

        Ok(())
    }

    /// Apply a `--seed` flag; falls back to `RNG_SEED` when absent.
    pub fn with_seed_override(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.rng_seed = seed;
        }
        self
    }

    /// Socket address to bind. Call after `validate`.
    pub fn bind_addr(&self) -> Option<SocketAddr> {
        let ip = self.host.parse::<IpAddr>().ok()?;
        Some(SocketAddr::new(ip, self.port))
    }

    /// Path of the greeting route; `/` when the prefix is empty.
    pub fn greeting_path(&self) -> String {
        if self.api_prefix.is_empty() {
            "/".to_string()
        } else {
            self.api_prefix.clone()
        }
    }

    /// Path of the matrices route.
    pub fn matrices_path(&self) -> String {
        format!("{}/matrices", self.api_prefix)
    }
}
