//! CSE Motors server
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use motors_api::AppState;
use motors_core::config::AppConfig;
use motors_core::error::AppError;
use motors_database::Stores;

#[tokio::main]
async fn main() {
    let env = std::env::var("MOTORS_ENV").ok();

    let config = match AppConfig::load(env.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(
        "Loaded configuration (overlay: {})",
        env.as_deref().unwrap_or("none")
    );

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting CSE Motors v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Stores (connects and migrates for PostgreSQL) ────
    tracing::info!(backend = ?config.database.backend, "Initializing stores...");
    let stores = Stores::from_config(&config.database).await?;

    // ── Step 2: Auth system and shared state ─────────────────────
    let state = AppState::new(config, stores)?;

    // ── Step 3: Serve until Ctrl+C / SIGTERM ─────────────────────
    motors_api::run_server(state).await?;

    tracing::info!("CSE Motors shut down gracefully");
    Ok(())
}
