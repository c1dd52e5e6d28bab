//! Error types for the tunnel installer.
//!
//! Precondition failures (missing companion scripts, bad script directory)
//! are kept distinct from filesystem failures so callers can report them
//! separately.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for installer operations.
#[derive(Debug, Error)]
pub enum InstallerError {
    // Precondition errors
    #[error("Required file is missing: {path}")]
    MissingDependency { path: PathBuf },

    #[error("Invalid script directory {path}: {reason}")]
    InvalidScriptDir { path: PathBuf, reason: String },

    #[error("Could not determine home directory")]
    HomeDirUnavailable,

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Failed to restore {path} after an incomplete install")]
    RollbackFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for installer operations.
pub type Result<T> = std::result::Result<T, InstallerError>;

impl From<std::io::Error> for InstallerError {
    fn from(err: std::io::Error) -> Self {
        InstallerError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl InstallerError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        InstallerError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create an IO error describing the failed action.
    pub fn io_action(action: &str, path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        InstallerError::Io {
            message: action.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// True for errors raised before anything on disk was touched.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            InstallerError::MissingDependency { .. }
                | InstallerError::InvalidScriptDir { .. }
                | InstallerError::HomeDirUnavailable
        )
    }
}
