//! Error types for packaging operations.
//!
//! Every fallible packaging operation returns [`Result`]. Errors that wrap an
//! underlying I/O failure keep the root cause attached so multi-platform runs
//! can report which job actually failed.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for packaging operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all packaging operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A package-type token that is neither an archive format nor a reserved
    /// installer format.
    #[error("unknown package type: \"{0}\"")]
    UnknownPackageType(String),

    /// An unrecognized pre-action name.
    #[error("invalid pre-action type: \"{0}\"")]
    InvalidPreActionType(String),

    /// The host OS has no known platform set and the caller supplied none.
    #[error("host platform \"{0}\" has no suitable packaging targets")]
    UnsupportedHostPlatform(String),

    /// I/O or compression failure inside the archive pipeline.
    ///
    /// A partial output file may be left behind at `path`; no cleanup is
    /// attempted.
    #[error("failed to create {format} archive at {path}: {source}")]
    Archive {
        /// Archive format that was being produced.
        format: &'static str,
        /// Output path of the (possibly partial) archive.
        path: PathBuf,
        /// Root cause.
        #[source]
        source: anyhow::Error,
    },

    /// Failure propagated unmodified from the external build collaborator.
    #[error("build tool failed: {0}")]
    Build(String),

    /// A placeholder token survived package-name resolution.
    #[error("unresolved placeholder \"{placeholder}\" in package name \"{name}\"")]
    UnresolvedPlaceholder {
        /// The offending `%…%` token.
        placeholder: String,
        /// The resolved name it appeared in.
        name: String,
    },

    /// Filesystem operation failure with the action and path that failed.
    #[error("failed {action} at {path}: {source}")]
    Fs {
        /// Human-readable description of the attempted operation.
        action: String,
        /// Path the operation was applied to.
        path: PathBuf,
        /// Root cause.
        #[source]
        source: std::io::Error,
    },

    /// IO errors without richer context.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors.
    #[error("{0}")]
    GenericError(String),
}

/// Adds a static message to `Option` and `Result` values.
pub trait Context<T> {
    /// Converts to [`Result`], attaching `msg` on the failure path.
    fn context(self, msg: &str) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{msg}: {e}")))
    }
}

/// Attaches filesystem context (action + path) to `io::Result` values.
pub trait ErrorExt<T> {
    /// Converts an I/O failure into [`Error::Fs`].
    fn fs_context(self, action: &str, path: &std::path::Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::io::Result<T> {
    fn fs_context(self, action: &str, path: &std::path::Path) -> Result<T> {
        self.map_err(|source| Error::Fs {
            action: action.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}
