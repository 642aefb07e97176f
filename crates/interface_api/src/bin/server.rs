//! Policy Transfer Clearinghouse - API Server Binary
//!
//! This binary starts the HTTP API server for the transfer clearinghouse.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin transfer-api
//!
//! # Run with environment variables
//! API_HOST=0.0.0.0 API_PORT=8080 GATEWAY_BROKER_DEALER_URL=http://... cargo run --bin transfer-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `GATEWAY_BROKER_DEALER_URL` - Broker-dealer API base URL
//! * `GATEWAY_CARRIER_URL` - Carrier API base URL
//! * `GATEWAY_CLEARINGHOUSE_URL` - Clearinghouse intermediary API base URL
//! * `GATEWAY_TIMEOUT_MS` - Outbound HTTP timeout in milliseconds

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_transfer::TransferOrchestrator;
use infra_gateway::{BrokerDealerClient, CarrierClient, ClearinghouseClient, GatewayConfig};
use interface_api::{config::ApiConfig, create_router};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, wires the collaborator HTTP
/// adapters into the orchestrator, and starts the HTTP server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config();
    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Policy Transfer Clearinghouse API Server"
    );

    let gateway = GatewayConfig::from_env().unwrap_or_default();
    let orchestrator = Arc::new(TransferOrchestrator::new(
        Arc::new(BrokerDealerClient::new(&gateway)?),
        Arc::new(CarrierClient::new(&gateway)?),
        Arc::new(ClearinghouseClient::new(&gateway)?),
    ));

    let app = create_router(orchestrator, config.clone());

    let addr: SocketAddr = config.server_addr().parse()?;
    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Falls back to individual env vars or defaults when the prefixed
/// configuration source is incomplete.
fn load_config() -> ApiConfig {
    ApiConfig::from_env().unwrap_or_else(|_| ApiConfig {
        host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
        port: std::env::var("API_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080),
        log_level: std::env::var("API_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string()),
    })
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
