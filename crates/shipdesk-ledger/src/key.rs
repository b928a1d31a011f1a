//! Document identifier resolution.
//!
//! Documents carry one of two legacy identifier fields, `numero` or
//! `codigo`, and callers address them with a single string. Resolution is
//! `numero` first: the first document whose `numero` equals the id wins,
//! and `codigo` is consulted only when no document has that `numero`.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use shipdesk_types::RecordExt;

/// Which field an identifier resolved through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyField {
    Numero,
    Codigo,
}

impl KeyField {
    /// Fields in resolution order.
    pub const PRECEDENCE: [KeyField; 2] = [KeyField::Numero, KeyField::Codigo];

    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Numero => "numero",
            Self::Codigo => "codigo",
        }
    }
}

/// An identifier addressed at the document ledger.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey(String);

impl DocumentKey {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if either identifier field of `document` equals this
    /// key. Elements that are not objects never match.
    pub fn matches(&self, document: &Value) -> bool {
        KeyField::PRECEDENCE
            .iter()
            .any(|field| self.matches_field(document, *field))
    }

    /// Position of the document this key addresses, and the field that
    /// matched. The element at that position is always an object.
    pub fn resolve(&self, documents: &[Value]) -> Option<(usize, KeyField)> {
        KeyField::PRECEDENCE.into_iter().find_map(|field| {
            documents
                .iter()
                .position(|d| self.matches_field(d, field))
                .map(|index| (index, field))
        })
    }

    fn matches_field(&self, document: &Value, field: KeyField) -> bool {
        document
            .as_object()
            .is_some_and(|d| d.field_equals(field.field_name(), &self.0))
    }
}

impl fmt::Debug for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentKey({:?})", self.0)
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentKey {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DocumentKey {
    fn from(id: String) -> Self {
        Self(id)
    }
}
