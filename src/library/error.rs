//! Library error types

use thiserror::Error;

/// Library error type
///
/// Every variant is reported to clients as 404 Not Found; the detail is only
/// for server-side logs.
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Path not found: {path}")]
    NotFound { path: String },

    #[error("Request path is not valid UTF-8 after decoding: {raw}")]
    InvalidPath { raw: String },

    #[error("Failed reading directory {path}: {source}")]
    ReadDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed reading file info {path}: {source}")]
    Metadata {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid content root {path}: {reason}")]
    InvalidRoot { path: String, reason: String },
}

impl LibraryError {
    /// Check if this error should result in a 404 Not Found response
    pub fn is_not_found(&self) -> bool {
        !matches!(self, LibraryError::InvalidRoot { .. })
    }
}
