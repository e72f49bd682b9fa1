//! Error handling for jobwatch
//!
//! Defines the error kinds a run can end with and establishes a unified
//! Result type using anyhow for context chaining and error propagation.

use thiserror::Error;

/// Terminal error kinds for a single run
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Status code: {status} ({url})")]
    HttpStatus { url: String, status: u16 },

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("notification error: {0}")]
    NotifyError(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for jobwatch operations
pub type Result<T> = anyhow::Result<T>;
