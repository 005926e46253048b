//! Error types for glmr

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while publishing a merge request
#[derive(Debug, Error)]
pub enum Error {
    /// The host integration is missing or has no usable credentials
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A remote step (branch, commit, merge request) was rejected
    #[error("{context}: {source}")]
    RemoteApi {
        /// Which step failed
        context: String,
        /// Underlying client error
        #[source]
        source: Box<Error>,
    },

    /// GitLab answered with a non-success status
    #[error("GitLab API error: {0}")]
    GitLabApi(String),

    /// Action input could not be used as given
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Config file could not be read or parsed
    #[error("failed to load config {}: {message}", path.display())]
    Config {
        /// Path of the offending file
        path: PathBuf,
        /// Parser or I/O message
        message: String,
    },

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Wrap a client error with the step that produced it
    pub fn remote(context: impl Into<String>, source: Self) -> Self {
        Self::RemoteApi {
            context: context.into(),
            source: Box::new(source),
        }
    }
}

/// Result type alias using glmr's Error
pub type Result<T> = std::result::Result<T, Error>;
