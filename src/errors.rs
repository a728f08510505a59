// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::dag::TaskId;

#[derive(Error, Debug)]
pub enum ApiaryError {
    /// Raised synchronously while building a job (priority out of range, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A task handle that does not belong to the graph it was used with.
    #[error("Task children must be a task of the same graph (got {0})")]
    NotATask(TaskId),

    /// A remote query (status catalogs) failed or came back empty.
    #[error("Request failed: {0}")]
    Request(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote service returned {status}: {body}")]
    Remote { status: u16, body: String },

    /// Any failure of `Submitter::submit`, with the originating error kept
    /// as the source.
    #[error("Submit failed: {message}")]
    SubmitFailed {
        message: String,
        #[source]
        source: Box<ApiaryError>,
    },

    #[error("Invalid submission transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiaryError {
    /// Wrap `source` into a [`ApiaryError::SubmitFailed`].
    pub fn submit(message: impl Into<String>, source: ApiaryError) -> Self {
        ApiaryError::SubmitFailed {
            message: message.into(),
            source: Box::new(source),
        }
    }

    pub fn is_submit_failure(&self) -> bool {
        matches!(self, ApiaryError::SubmitFailed { .. })
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ApiaryError>;
