//! Error types for the API client adapter.

use thiserror::Error;

/// Local form checks, in the order they run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a file.")]
    MissingFile,

    #[error("Could not read file: {0}")]
    UnreadableFile(String),

    #[error("Mode must be 'column' or 'row'.")]
    InvalidMode,

    #[error("keep_policy must be mark_all, keep_first, or keep_last.")]
    InvalidKeepPolicy,

    #[error("Key column is required for column mode.")]
    MissingKeyColumn,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No response was received.
    #[error("{0}")]
    Transport(String),

    /// Non-2xx response; `message` comes from the body fallback chain.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("invalid response body: {0}")]
    InvalidBody(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// HTTP status for server-reported errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
