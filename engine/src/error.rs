//! Error types for the recdiff engine.
//!
//! Comparison and delta conversion are total and never return these; they
//! cover schema resolution and option parsing only.

use thiserror::Error;

/// All possible errors from the recdiff engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Schema errors
    #[error("custom type '{0}' has no schema attached")]
    MissingSchema(String),

    #[error("unknown native type: {0}")]
    UnknownNativeType(String),

    // Option errors
    #[error("invalid array key entry '{0}': expected <path>=<key>")]
    InvalidArrayKey(String),

    #[error("invalid compare options: {0}")]
    InvalidOptions(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidOptions(err.to_string())
    }
}
