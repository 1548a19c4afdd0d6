//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the IVOR gateway and its cascade monitor.
#[derive(Parser)]
#[command(name = "ivor")]
#[command(about = "Run and monitor the IVOR cross-domain API gateway")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
