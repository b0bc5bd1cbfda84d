//! agence: backend API for the marketing site.
//!
//! This is the application entry point. It initializes tracing, loads
//! configuration from a TOML file (with environment overrides), constructs
//! the document store collaborators, sets up the Axum router with all
//! routes, and starts the HTTP server.

use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agence::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use agence::routes::create_router;
use agence::state::AppState;
use agence::store;

/// agence: backend API for the marketing site
#[derive(Parser, Debug)]
#[command(name = "agence", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "agence=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load(&args.config)?;
    tracing::info!("Loaded configuration");

    // Construct the document store collaborators
    let (document_store, probe) = store::build(&config.store)?;
    if config.store.is_configured() {
        tracing::info!(
            database = %config.store.database_name(),
            "Document store configured"
        );
    } else {
        tracing::warn!("No document store configured; audit submissions will be rejected");
    }

    // Create application state and router
    let state = AppState::new(config.clone(), document_store, probe);
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.http.host, config.http.port)
        .parse()
        .expect("Invalid http.host or http.port in config");
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
