//! Error types for lead document I/O

use thiserror::Error;

/// Document reader/writer errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("document has no top-level `{0}` array")]
    MissingCollection(String),

    #[error("collection entry {index} is not an object (found {found})")]
    InvalidRecord { index: usize, found: &'static str },
}

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, Error>;
