//! Error types for kbgraph

use thiserror::Error;

/// Result type alias using kbgraph's Error
pub type Result<T> = std::result::Result<T, Error>;

/// kbgraph error types with helpful messages and suggestions
#[derive(Error, Debug)]
pub enum Error {
    // Entity errors (E001-E099)
    #[error("Document '{0}' not found. Run `kbgraph docs list` to see all documents.")]
    DocumentNotFound(String),

    // Store errors (E100-E199)
    #[error("Document store unavailable: {0}")]
    StoreUnavailable(String),

    // Config errors (E600-E699)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // Input errors (E800-E899)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::DocumentNotFound(_) => "E001",
            Self::StoreUnavailable(_) => "E100",
            Self::ConfigError(_) => "E600",
            Self::InvalidInput(_) => "E800",
            Self::Serialization(_) => "E801",
            Self::Io(_) => "E9999",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::DocumentNotFound(_) => Some("kbgraph docs list".to_string()),
            Self::StoreUnavailable(_) => {
                Some("kbgraph config get store.documents_path".to_string())
            }
            Self::ConfigError(_) => Some("kbgraph config list".to_string()),
            _ => None,
        }
    }

    /// Whether the error originated in the document store
    pub fn is_store_error(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}
