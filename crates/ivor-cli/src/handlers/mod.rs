//! Subcommand handlers.

pub mod monitor;
pub mod serve;
pub mod status;

pub use monitor::handle_monitor;
pub use serve::handle_serve;
pub use status::handle_status;
