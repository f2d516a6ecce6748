//! Lead record model and entry date parsing

use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

/// Field holding the opaque identity value
pub const ID_FIELD: &str = "id";
/// Field holding the email identity alternative
pub const EMAIL_FIELD: &str = "email";
/// Field holding the ISO-8601 recency timestamp
pub const ENTRY_DATE_FIELD: &str = "entryDate";

/// A lead record admitted into a deduplication pass
///
/// The field map is carried through unchanged, in original order. The ordinal
/// position and the parsed entry date live beside the map, never inside it,
/// so bookkeeping cannot leak into output records or diffs.
#[derive(Debug, Clone)]
pub struct LeadRecord {
    /// The record's fields exactly as loaded
    pub fields: Map<String, Value>,
    /// 0-based index in the input sequence, used only as a tie-break
    pub position: usize,
    /// Parsed `entryDate`, normalized to UTC
    pub entry_date: DateTime<Utc>,
}

impl LeadRecord {
    /// Admit a raw field map into the pass
    ///
    /// Validates that `id` and `email` are keyable and that `entryDate` is
    /// present and parseable. Any violation fails the whole batch.
    pub fn admit(fields: Map<String, Value>, position: usize) -> Result<Self> {
        let entry_date = match fields.get(ENTRY_DATE_FIELD) {
            None | Some(Value::Null) => {
                return Err(Error::MissingField {
                    field: ENTRY_DATE_FIELD,
                    position,
                })
            }
            Some(Value::String(raw)) => {
                parse_entry_date(raw).ok_or_else(|| Error::InvalidDate {
                    position,
                    value: raw.clone(),
                })?
            }
            Some(other) => {
                return Err(Error::InvalidDate {
                    position,
                    value: other.to_string(),
                })
            }
        };

        let record = Self {
            fields,
            position,
            entry_date,
        };

        // Surface identity violations at admission, not mid-lookup.
        record.identity_key(ID_FIELD)?;
        record.identity_key(EMAIL_FIELD)?;

        Ok(record)
    }

    /// Canonical string key for one of the identity fields
    ///
    /// Strings key as themselves; numbers key by their textual form, so
    /// `"id": 1` and `"id": 1` in separate records land in the same group.
    pub fn identity_key(&self, field: &'static str) -> Result<String> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Err(Error::MissingField {
                field,
                position: self.position,
            }),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(other) => Err(Error::InvalidIdentity {
                field,
                position: self.position,
                value: other.to_string(),
            }),
        }
    }
}

/// Parse an ISO-8601 entry date, normalized to UTC
///
/// Accepted forms, tried in order:
/// - RFC 3339 with offset (`2014-05-07T17:30:20+00:00`)
/// - naive datetime, optional fractional seconds (`2014-05-07T17:30:20`)
/// - bare date, taken as midnight UTC (`2014-05-07`)
///
/// Equal instants in different textual renderings compare equal after
/// parsing; recency comparisons are never string comparisons.
pub fn parse_entry_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}
