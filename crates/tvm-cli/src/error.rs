//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;
use tvm_core::SessionError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The command file could not be opened.
    #[error("Cannot open {}: {source}", .path.display())]
    Open {
        /// Path given on the command line.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Reading input or writing output failed.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
