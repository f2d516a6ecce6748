//! Supersession change log

use serde::Serialize;
use serde_json::{json, Map, Value};

/// One supersession event
///
/// Captures the displaced record, its replacement, and the field-by-field
/// diff restricted to fields that actually changed. Both embedded records are
/// plain field maps; positional bookkeeping never appears in them.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeLogEntry {
    /// The representative that was displaced
    pub replaced_record: Map<String, Value>,
    /// The incoming record that displaced it
    pub new_record: Map<String, Value>,
    /// Field name to `{"from": old, "to": new}`, changed fields only
    pub changes: Map<String, Value>,
}

/// Asymmetric field diff between an outgoing representative and the incoming
/// record that replaces it
///
/// Iterates the incoming record's fields only: a field missing from the
/// outgoing record compares as null, and fields present only on the outgoing
/// record are never reported (the incoming record does not enumerate
/// removals). Entry order follows the incoming record's field order.
pub fn field_diff(
    outgoing: &Map<String, Value>,
    incoming: &Map<String, Value>,
) -> Map<String, Value> {
    let mut changes = Map::new();

    for (field, new_value) in incoming {
        let old_value = outgoing.get(field).unwrap_or(&Value::Null);
        if old_value != new_value {
            changes.insert(field.clone(), json!({"from": old_value, "to": new_value}));
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_diff_reports_changed_fields_only() {
        let outgoing = fields(json!({"id": "1", "name": "Ann", "city": "Omaha"}));
        let incoming = fields(json!({"id": "1", "name": "Anne", "city": "Omaha"}));

        let changes = field_diff(&outgoing, &incoming);

        assert_eq!(changes.len(), 1);
        assert_eq!(changes["name"], json!({"from": "Ann", "to": "Anne"}));
    }

    #[test]
    fn test_diff_field_new_to_incoming_compares_from_null() {
        let outgoing = fields(json!({"id": "1"}));
        let incoming = fields(json!({"id": "1", "phone": "555-0100"}));

        let changes = field_diff(&outgoing, &incoming);

        assert_eq!(changes["phone"], json!({"from": null, "to": "555-0100"}));
    }

    #[test]
    fn test_diff_is_asymmetric() {
        // Present only on the outgoing side: not reported.
        let outgoing = fields(json!({"id": "1", "fax": "555-0199"}));
        let incoming = fields(json!({"id": "1"}));

        let changes = field_diff(&outgoing, &incoming);

        assert!(changes.is_empty());
    }

    #[test]
    fn test_diff_identical_records_is_empty() {
        let record = fields(json!({"id": "1", "email": "a@x.com", "name": "Ann"}));
        assert!(field_diff(&record, &record).is_empty());
    }

    #[test]
    fn test_diff_preserves_incoming_field_order() {
        let outgoing = fields(json!({"a": 1, "b": 2, "c": 3}));
        let incoming = fields(json!({"c": 30, "a": 10, "b": 2}));

        let changes = field_diff(&outgoing, &incoming);
        let keys: Vec<_> = changes.keys().cloned().collect();

        assert_eq!(keys, vec!["c", "a"]);
    }
}
