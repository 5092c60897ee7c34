//! Gate error types

use thiserror::Error;

/// Riddle gate error type
#[derive(Error, Debug)]
pub enum GateError {
    #[error("Riddle file does not contain a newline")]
    MissingNewline,

    #[error("Riddle answer hash is invalid: {reason}")]
    InvalidHash { reason: String },

    #[error("Session store error: {reason}")]
    Store { reason: String },
}
