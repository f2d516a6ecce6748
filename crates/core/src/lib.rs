//! Core lead deduplication logic
//!
//! This crate provides the data model and single-pass algorithm for
//! identity-keyed deduplication of lead records.

pub mod changelog;
pub mod dedup;
pub mod error;
pub mod record;

pub use changelog::{field_diff, ChangeLogEntry};
pub use dedup::{deduplicate, DedupOutcome, DedupStats};
pub use error::{Error, Result};
pub use record::LeadRecord;
