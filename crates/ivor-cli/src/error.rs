//! CLI-specific error types and exit-code mappings.

use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument parsing or validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (bind failure, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Gateway server or request failure.
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Monitoring run failure.
    #[error("Monitor error: {0}")]
    Monitor(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: sysexits.h categories where one fits
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Gateway(_) | Self::Monitor(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Arguments("bad".to_string()).exit_code(), 2);
        assert_eq!(CliError::Config("bad".to_string()).exit_code(), 78);
        assert_eq!(CliError::Gateway("down".to_string()).exit_code(), 1);
    }
}
