//! SantimPay Relay Server
//!
//! Accepts merchant payment requests over HTTP, signs them with the merchant
//! key and forwards them to the SantimPay gateway.
//!
//! ## Environment
//!
//! - `SERVER_PORT` - listen port (default: 8080)
//! - `SANTIMPAY_MERCHANT_ID` - merchant identifier (required)
//! - `SANTIMPAY_PRIVATE_KEY` - PEM encoded P-256 private key (required)
//! - `SANTIMPAY_TEST_MODE` - `true`/`1` for the test gateway (default: true)
//! - `SANTIMPAY_BASE_URL` - gateway base URL override
//! - `SANTIMPAY_TIMEOUT_SECS` - outbound request timeout (default: 30)
//! - `RUST_LOG` - log filter (default: info)

use santimpay_relay::{
    config::RelayConfig,
    gateway::GatewayClient,
    server::{create_router, serve, ServerConfig},
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match RelayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let environment = config.gateway.environment;
    let bind_address = config.bind_address();

    let gateway = match GatewayClient::new(config.gateway) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to initialize SantimPay client: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("SantimPay mode: {}", environment);
    tracing::info!("Gateway: {}", gateway.base_url());
    tracing::info!("Server starting on port {}", config.server_port);

    let app = create_router(Arc::new(gateway));
    serve(app, ServerConfig::new(bind_address)).await?;

    Ok(())
}
