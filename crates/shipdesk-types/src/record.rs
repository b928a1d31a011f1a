//! Semi-structured records.
//!
//! A record has no schema beyond the fields each component reads. Field
//! order is preserved (the workspace enables `serde_json/preserve_order`),
//! so a record written back to disk keeps the layout the caller gave it.

use serde_json::{Map, Value};

/// One business entity: package, document, transaction, user, employee.
pub type Record = Map<String, Value>;

/// Lenient accessors over [`Record`].
///
/// Components read fields the way the persisted files were always read:
/// a missing field and a non-string field both look like "no text".
pub trait RecordExt {
    /// The field as a string slice, if present and a JSON string.
    fn str_field(&self, key: &str) -> Option<&str>;

    /// The field as text, or `""` when absent or not a string.
    fn text(&self, key: &str) -> &str {
        self.str_field(key).unwrap_or("")
    }

    /// Returns `true` if the field is a string equal to `expected`.
    fn field_equals(&self, key: &str, expected: &str) -> bool {
        self.str_field(key) == Some(expected)
    }

    /// Set a string field, replacing any previous value in place.
    fn set_text(&mut self, key: &str, value: impl Into<String>);

    /// Set a boolean field, replacing any previous value in place.
    fn set_flag(&mut self, key: &str, value: bool);
}

impl RecordExt for Record {
    fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn set_text(&mut self, key: &str, value: impl Into<String>) {
        self.insert(key.to_string(), Value::String(value.into()));
    }

    fn set_flag(&mut self, key: &str, value: bool) {
        self.insert(key.to_string(), Value::Bool(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn text_of_missing_field_is_empty() {
        let r = record(json!({"codigo": "P1"}));
        assert_eq!(r.text("estado"), "");
        assert_eq!(r.text("codigo"), "P1");
    }

    #[test]
    fn non_string_field_reads_as_empty_text() {
        let r = record(json!({"monto": 12.5, "es_duplicado": true}));
        assert_eq!(r.text("monto"), "");
        assert!(r.str_field("es_duplicado").is_none());
    }

    #[test]
    fn field_equals_requires_string_match() {
        let r = record(json!({"numero": "F001-0001", "codigo": 7}));
        assert!(r.field_equals("numero", "F001-0001"));
        assert!(!r.field_equals("codigo", "7"));
    }

    #[test]
    fn set_text_keeps_field_position() {
        let mut r = record(json!({"a": "1", "estado": "Pagado", "z": "2"}));
        r.set_text("estado", "Pendiente");
        let keys: Vec<&str> = r.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "estado", "z"]);
        assert_eq!(r.text("estado"), "Pendiente");
    }

    #[test]
    fn set_flag_appends_new_field_last() {
        let mut r = record(json!({"numero": "F001-0002"}));
        r.set_flag("es_duplicado", true);
        assert_eq!(r.keys().last().map(String::as_str), Some("es_duplicado"));
        assert_eq!(r.get("es_duplicado"), Some(&Value::Bool(true)));
    }
}
