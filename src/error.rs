//! Top-level error types for the appdist binary.

use thiserror::Error;

/// Result type alias for binary-level operations.
pub type Result<T> = std::result::Result<T, AppdistError>;

/// Error type wrapping everything the binary surface can fail with.
#[derive(Error, Debug)]
pub enum AppdistError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Packaging errors from the core engine
    #[error(transparent)]
    Packager(#[from] crate::packager::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}
