//! Error types for promptpack.
//!
//! Library crates use [`PromptPackError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all promptpack operations.
#[derive(Debug, thiserror::Error)]
pub enum PromptPackError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The scan root could not be traversed.
    #[error("discovery error at {path:?}: {message}")]
    Discovery { path: PathBuf, message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PromptPackError>;

impl PromptPackError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a discovery error for the given root.
    pub fn discovery(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Discovery {
            path: path.into(),
            message: msg.into(),
        }
    }
}
