//! Error types for the data-access layer

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by [`crate::api::ExhibitApi`]
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network-level failure: connect, timeout, TLS, body read
    #[error("{}", describe_transport(.0))]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The body could not be decoded into the expected shape
    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The image selected for upload could not be read
    #[error("Cannot read image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// HTTP status code, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Any non-2xx reply counts as NotFound for single-record lookups
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { .. })
    }
}

fn describe_transport(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timed out".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        format!("Request failed: {}", e)
    }
}

/// Result type for data-access operations
pub type Result<T> = std::result::Result<T, ApiError>;
