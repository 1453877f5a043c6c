//! RoleHub Server: users, roles and permissions microservice.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use rolehub_core::config::{AppConfig, LogFormat};
use rolehub_core::error::AppError;
use rolehub_store::Backends;

#[tokio::main]
async fn main() {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("ROLEHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
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
    tracing::info!("Starting RoleHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Store and identity provider clients ──────────────
    let backends = Backends::connect(&config.store)?;

    // ── Step 2: Services, verifier and gate ──────────────────────
    let state = rolehub_api::AppState::new(&backends);

    // ── Step 3: Build and start HTTP server ──────────────────────
    tracing::info!(
        origins = ?config.server.cors.allowed_origins,
        "CORS configured"
    );
    let app = rolehub_api::build_app(state, &config.server.cors);
    rolehub_api::serve(app, &config.server).await
}
