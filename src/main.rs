//! Identity-Pseudonymizing Reverse-Proxy Gateway
//!
//! A minimal gateway built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌────────────────────────────────────────────────┐
//!                  │                   GATEWAY                      │
//!                  │                                                │
//!  Client Request  │  ┌──────────┐     ┌─────────────┐             │
//!  ────────────────┼─▶│   http   │────▶│  encrypt    │──┐          │
//!                  │  │  server  │     │ middleware  │  │          │
//!                  │  └──────────┘     └──────┬──────┘  │          │
//!                  │                          │         ▼          │
//!                  │                          │   ┌───────────┐    │     ┌──────────┐
//!                  │              500 on fail │   │  forward  │────┼────▶│ upstream │
//!                  │                          │   │  handler  │◀───┼─────│  origin  │
//!  Client Response │                          ▼   └───────────┘    │     └──────────┘
//!  ◀───────────────┼──────────────────────────────────┘            │
//!                  │                                                │
//!                  │         │ POST {"userName": ...}               │
//!                  │         ▼                                      │
//!                  │  ┌─────────────────────┐                       │
//!                  │  │ encryption service  │ (external, opaque)    │
//!                  │  └─────────────────────┘                       │
//!                  └────────────────────────────────────────────────┘
//! ```
//!
//! Each inbound request is handled independently; a request blocked on the
//! encryption service never serializes the others.

use tokio::net::TcpListener;

use identity_gateway::config::GatewayConfig;
use identity_gateway::http::HttpServer;
use identity_gateway::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    tracing::info!("identity-gateway v0.1.0 starting");

    // Load configuration from the environment; missing required variables
    // are fatal before any traffic is served.
    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Configuration error");
            std::process::exit(1);
        }
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        target_server_url = %config.target_server_url,
        encryption_service_url = %config.encryption_service_url,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Create and run HTTP server
    let server = HttpServer::new(&config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
