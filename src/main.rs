//! spaceship API server entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use spaceship::api::{create_router, AppState};
use spaceship::config::Config;
use spaceship::metrics;
use spaceship::utils::shutdown_signal;
use spaceship::SpaceshipError;

/// Greeting and random dot-product HTTP API.
#[derive(Parser, Debug)]
#[command(name = "spaceship")]
#[command(about = "HTTP API serving a greeting and random dot products")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Seed for the random source (overrides RNG_SEED).
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Seed for the random source (overrides RNG_SEED).
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Print one matrices payload as JSON.
    Sample {
        /// Seed for the random source (overrides RNG_SEED).
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Configuration also drives logging, so load it before anything logs
    let config = Config::load();

    let (verbose, log_json, rust_log) = match &config {
        Ok(c) => (args.verbose || c.verbose, c.log_json, c.rust_log.clone()),
        Err(_) => (args.verbose, false, "info".to_string()),
    };
    init_tracing(verbose, log_json, &rust_log);

    match args.command {
        Some(Command::Serve { port, seed }) => cmd_serve(config?, port, seed).await,
        Some(Command::CheckConfig) => cmd_check_config(config),
        Some(Command::Sample { seed }) => cmd_sample(config?, seed).await,
        None => cmd_serve(config?, args.port, args.seed).await,
    }
}

/// Initialize the tracing subscriber.
fn init_tracing(verbose: bool, json: bool, rust_log: &str) {
    let filter = if verbose {
        EnvFilter::new("spaceship=debug,info")
    } else {
        EnvFilter::try_new(rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .with(filter)
        .init();
}

/// Run the HTTP server until Ctrl+C or SIGTERM.
async fn cmd_serve(
    mut config: Config,
    port_override: Option<u16>,
    seed_override: Option<u64>,
) -> anyhow::Result<()> {
    // Override with CLI args if provided
    if let Some(port) = port_override {
        config.port = port;
    }
    config = config.with_seed_override(seed_override);

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(SpaceshipError::InvalidConfig(e).into());
    }
    let addr = config
        .bind_addr()
        .ok_or_else(|| SpaceshipError::InvalidConfig(format!("bad bind address {}", config.host)))?;

    info!("Configuration loaded successfully");
    info!("API prefix: {:?}", config.api_prefix);
    match config.rng_seed {
        Some(seed) => warn!("Random source seeded with {}; payloads are reproducible", seed),
        None => info!("Random source seeded from entropy"),
    }

    let handle = metrics::install_prometheus()?;
    let app_state = AppState::from_config(&config).with_metrics(handle);
    let router = create_router(app_state.clone(), &config);

    let listener = TcpListener::bind(addr).await.map_err(SpaceshipError::from)?;
    info!("HTTP server listening on {}", addr);
    app_state.set_ready(true);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(SpaceshipError::from)?;

    app_state.set_ready(false);
    info!("Server stopped");
    Ok(())
}

/// Check configuration validity.
fn cmd_check_config(config: Result<Config, envy::Error>) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("SPACESHIP - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match config {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(SpaceshipError::from(e).into());
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(SpaceshipError::InvalidConfig(e).into());
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Bind: {}:{}", config.host, config.port);
    println!("  Greeting: GET {}", config.greeting_path());
    println!("  Matrices: GET {}", config.matrices_path());
    println!("  CORS: {}", if config.cors { "Enabled" } else { "Disabled" });
    match config.rng_seed {
        Some(seed) => println!("  RNG Seed: {}", seed),
        None => println!("  RNG Seed: entropy"),
    }
    println!("  Log: {} ({})", config.rust_log, if config.log_json { "json" } else { "text" });
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Print one matrices payload, seeded the same way as `serve`.
async fn cmd_sample(config: Config, seed_override: Option<u64>) -> anyhow::Result<()> {
    let config = config.with_seed_override(seed_override);
    let state = AppState::from_config(&config);

    let matrices = state.generate_matrices().await.map_err(SpaceshipError::from)?;
    println!("{}", serde_json::to_string_pretty(&matrices)?);

    Ok(())
}
