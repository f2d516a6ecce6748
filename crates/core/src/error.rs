//! Error types for the core deduplication engine

use thiserror::Error;

/// Core deduplication errors
///
/// All of these are fatal for the whole batch: there is no defaulting policy
/// for missing fields and no skip-and-continue for bad dates.
#[derive(Error, Debug)]
pub enum Error {
    #[error("record at position {position} is missing required field `{field}`")]
    MissingField {
        field: &'static str,
        position: usize,
    },

    #[error("record at position {position} has a non-keyable `{field}` value: {value}")]
    InvalidIdentity {
        field: &'static str,
        position: usize,
        value: String,
    },

    #[error("record at position {position} has an unparseable entryDate: {value}")]
    InvalidDate { position: usize, value: String },
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
