//! CLI entry point - the composition root.
//!
//! The only place where configuration, logging and the adapters are wired
//! together. Command dispatch routes to the handlers.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ivor_cli::{Cli, Commands, handlers};

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "ivor=debug,info" } else { "ivor=info,warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match cli.command {
        Commands::Serve { port } => handlers::handle_serve(port).await.map(|()| 0),
        Commands::Monitor {
            gateway_url,
            webhook_url,
        } => handlers::handle_monitor(gateway_url, webhook_url).await,
        Commands::Status { gateway_url } => handlers::handle_status(gateway_url).await.map(|()| 0),
    };

    match outcome {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("{e}");
            std::process::exit(e.exit_code());
        }
    }
}
