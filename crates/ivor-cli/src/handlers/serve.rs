//! `ivor serve` - run the gateway HTTP server.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use ivor_core::GatewayConfig;

use crate::error::CliError;

/// Bind the configured port and run the gateway until ctrl-c.
pub async fn handle_serve(port: Option<u16>) -> Result<(), CliError> {
    let mut config = GatewayConfig::from_env();
    if let Some(port) = port {
        config.port = port;
    }

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            shutdown.cancel();
        }
    });

    ivor_gateway::serve(listener, Arc::new(config), cancel)
        .await
        .map_err(|e| CliError::Gateway(e.to_string()))
}
