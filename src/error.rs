//! Client core error types

use thiserror::Error;

/// Client core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Local validation failure (bad file, missing identifier); never reaches the network
    #[error("Validation error: {0}")]
    Validation(String),

    /// API responded with success=false or a structured error body
    #[error("Business error: {message}")]
    Business {
        /// Server-provided message, already unwrapped from the error envelope
        message: String,
        /// Machine-readable error code (e.g. `duplicate_file`)
        code: Option<String>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication error
    #[error("Auth error: {0}")]
    Auth(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Error code carried by a business error, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Error::Business { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

/// Result type alias for client core operations
pub type Result<T> = std::result::Result<T, Error>;
