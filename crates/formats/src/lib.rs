//! Lead document I/O
//!
//! Reading and writing the JSON documents that carry lead collections,
//! with order and field presence preserved exactly.

pub mod document;
pub mod error;

pub use document::{read_document, write_document, DEFAULT_COLLECTION_FIELD};
pub use error::{Error, Result};
