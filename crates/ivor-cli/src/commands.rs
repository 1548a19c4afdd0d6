//! Subcommand definitions.

use clap::Subcommand;

/// Top-level subcommands for the `ivor` binary.
#[derive(Subcommand)]
pub enum Commands {
    /// Run the API gateway HTTP server
    Serve {
        /// Port to bind (defaults to IVOR_GATEWAY_PORT or 8080)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run one cascade-monitoring pass and exit (0 healthy, 1 otherwise)
    Monitor {
        /// Gateway base URL to probe
        #[arg(long = "gateway-url", env = "IVOR_GATEWAY_URL")]
        gateway_url: Option<String>,

        /// Webhook URL for cascade-failure alerts
        #[arg(long = "webhook-url", env = "TELEGRAM_WEBHOOK_URL")]
        webhook_url: Option<String>,
    },

    /// Fetch and print the gateway's per-service status fan-out
    Status {
        /// Gateway base URL to query
        #[arg(long = "gateway-url", env = "IVOR_GATEWAY_URL")]
        gateway_url: Option<String>,
    },
}
