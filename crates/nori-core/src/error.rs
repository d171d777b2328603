//! Error types for document intake and extraction

use thiserror::Error;

/// Main error type for the intake engine
#[derive(Error, Debug)]
pub enum Error {
    /// Structurally broken XML that the tree builder cannot recover from
    #[error("Malformed document: {0}")]
    Malformed(String),

    /// Document carries no resolvable patient identifier; nothing can be
    /// persisted for it without orphaning dependent records
    #[error("No resolvable patient identifier in document")]
    MissingPatientId,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;
