//! JSON lead document reader and writer
//!
//! A lead document is a single JSON object with one top-level array field
//! holding the lead collection. The reader hands the collection back exactly
//! as written: element order, field order, and field presence are preserved,
//! with no type coercion of unknown fields.

use crate::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Default top-level collection field name
pub const DEFAULT_COLLECTION_FIELD: &str = "leads";

/// Read a lead document and extract its top-level collection
///
/// Fails before producing anything if the file is unreadable, the document
/// is malformed, the collection field is missing or not an array, or any
/// element is not an object.
pub fn read_document<P: AsRef<Path>>(
    path: P,
    collection_field: &str,
) -> Result<Vec<Map<String, Value>>> {
    let path = path.as_ref();
    debug!("Reading lead document: {:?}", path);

    let file = File::open(path)?;
    let document: Value = serde_json::from_reader(BufReader::new(file))?;

    let collection = document
        .get(collection_field)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::MissingCollection(collection_field.to_string()))?;

    let mut records = Vec::with_capacity(collection.len());
    for (index, entry) in collection.iter().enumerate() {
        match entry {
            Value::Object(fields) => records.push(fields.clone()),
            other => {
                return Err(Error::InvalidRecord {
                    index,
                    found: value_type(other),
                })
            }
        }
    }

    info!("Read {} lead records from {:?}", records.len(), path);
    Ok(records)
}

/// Write `{ root_field: payload }` as pretty-printed JSON
pub fn write_document<P: AsRef<Path>, T: Serialize>(
    path: P,
    root_field: &str,
    payload: &T,
) -> Result<()> {
    let path = path.as_ref();

    let mut document = Map::new();
    document.insert(root_field.to_string(), serde_json::to_value(payload)?);

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &Value::Object(document))?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    debug!("Wrote {:?} under root field `{}`", path, root_field);
    Ok(())
}

fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_document_basic() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            r#"{{"leads": [{{"id": "1", "email": "a@x.com"}}, {{"id": "2", "email": "b@x.com"}}]}}"#
        )
        .unwrap();
        temp_file.flush().unwrap();

        let records = read_document(temp_file.path(), "leads").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["id"], "1");
        assert_eq!(records[1]["email"], "b@x.com");
    }

    #[test]
    fn test_read_document_preserves_field_order() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            r#"{{"leads": [{{"zeta": 1, "alpha": 2, "mid": 3}}]}}"#
        )
        .unwrap();
        temp_file.flush().unwrap();

        let records = read_document(temp_file.path(), "leads").unwrap();
        let keys: Vec<_> = records[0].keys().cloned().collect();

        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_read_document_missing_collection() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{"contacts": []}}"#).unwrap();
        temp_file.flush().unwrap();

        let result = read_document(temp_file.path(), "leads");
        assert!(matches!(result, Err(Error::MissingCollection(_))));
    }

    #[test]
    fn test_read_document_collection_not_an_array() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{"leads": "not an array"}}"#).unwrap();
        temp_file.flush().unwrap();

        let result = read_document(temp_file.path(), "leads");
        assert!(matches!(result, Err(Error::MissingCollection(_))));
    }

    #[test]
    fn test_read_document_non_object_entry() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{"leads": [{{"id": "1"}}, 42]}}"#).unwrap();
        temp_file.flush().unwrap();

        let result = read_document(temp_file.path(), "leads");
        assert!(matches!(
            result,
            Err(Error::InvalidRecord {
                index: 1,
                found: "number"
            })
        ));
    }

    #[test]
    fn test_read_document_malformed_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{{not json").unwrap();
        temp_file.flush().unwrap();

        let result = read_document(temp_file.path(), "leads");
        assert!(matches!(result, Err(Error::JsonParse(_))));
    }

    #[test]
    fn test_read_document_missing_file() {
        let result = read_document("/nonexistent/leads.json", "leads");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_write_document_wraps_payload() {
        let temp_file = NamedTempFile::new().unwrap();
        let payload = json!([{"id": "1", "email": "a@x.com"}]);

        write_document(temp_file.path(), "leads", &payload).unwrap();

        let written: Value =
            serde_json::from_reader(File::open(temp_file.path()).unwrap()).unwrap();
        assert_eq!(written, json!({"leads": [{"id": "1", "email": "a@x.com"}]}));
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let temp_file = NamedTempFile::new().unwrap();
        let payload = json!([
            {"id": "1", "email": "a@x.com", "entryDate": "2024-01-01", "extra": null},
        ]);

        write_document(temp_file.path(), "leads", &payload).unwrap();
        let records = read_document(temp_file.path(), "leads").unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["extra"], Value::Null);
    }
}
