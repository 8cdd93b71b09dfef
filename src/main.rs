//! Payroll Formula Engine service
//!
//! Serves the formula builder, salary categories and payroll recording over
//! HTTP, backed by an in-memory document store seeded from configuration.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::{ConfigLoader, DEFAULT_CONFIG_PATH};
use payroll_engine::store::{InMemoryDocumentStore, TimedDocumentStore};

/// Payroll Formula Engine CLI
#[derive(Parser)]
#[command(name = "payroll-engine")]
#[command(about = "Salary formula builder and payroll recording service", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "PAYROLL_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Listen address (overrides the configuration file)
    #[arg(short, long, env = "PAYROLL_LISTEN_ADDR")]
    listen: Option<String>,

    /// Log level (overrides the configuration file)
    #[arg(long, env = "PAYROLL_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "PAYROLL_LOG_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = ConfigLoader::load(&cli.config)?.into_config();

    // Override with CLI args
    if let Some(listen) = cli.listen.as_deref() {
        config.server.listen_addr = listen
            .parse::<SocketAddr>()
            .map_err(|e| format!("Invalid listen address '{}': {}", listen, e))?;
    }
    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| log_level.into());

    if cli.json || config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let memory = Arc::new(InMemoryDocumentStore::new());
    let seeded = memory.seed_employees(&config.seed.employees).await?;
    let store = Arc::new(TimedDocumentStore::new(memory, config.store.timeout()));

    let store_timeout_ms = store.timeout().as_millis() as u64;

    let app = create_router(AppState::new(store));
    let listener = tokio::net::TcpListener::bind(config.server.listen_addr).await?;

    info!(
        config = %cli.config,
        listen_addr = %config.server.listen_addr,
        store_timeout_ms,
        seeded_employees = seeded,
        version = env!("CARGO_PKG_VERSION"),
        "Payroll engine listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
