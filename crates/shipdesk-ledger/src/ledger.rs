use std::sync::Arc;

use serde_json::Value;
use shipdesk_store::{RecordStore, RecordStoreExt};
use shipdesk_types::{Clock, Collection, Record, RecordExt};
use tracing::{debug, info};

use crate::error::{LedgerError, LedgerResult};
use crate::key::DocumentKey;
use crate::kind::DocumentKind;
use crate::numbering::{DocumentSeries, Numbering};
use crate::search::DocumentFilter;

/// Status given to every duplicated document.
pub const DUPLICATE_STATUS: &str = "Pendiente";

/// Billing documents, persisted as the `Documents` collection.
///
/// Every mutation runs inside the `Documents` critical section. Numbering
/// takes the `Sequences` guard while `Documents` is held, never the other
/// way round.
#[derive(Clone)]
pub struct DocumentLedger {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
    numbering: Numbering,
}

impl DocumentLedger {
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        let numbering = Numbering::new(store.clone());
        Self {
            store,
            clock,
            numbering,
        }
    }

    pub fn numbering(&self) -> &Numbering {
        &self.numbering
    }

    /// Every document, in insertion order.
    pub fn list(&self) -> LedgerResult<Vec<Record>> {
        Ok(self.store.load(Collection::Documents)?)
    }

    /// Append a document as given. No number is assigned.
    pub fn create(&self, document: Record) -> LedgerResult<Record> {
        self.store
            .transact(Collection::Documents, |docs: &mut Vec<Value>| {
                docs.push(Value::Object(document.clone()));
                debug!(count = docs.len(), "document created");
                Ok::<_, LedgerError>(())
            })?;
        Ok(document)
    }

    pub fn get(&self, id: &str) -> LedgerResult<Record> {
        let key = DocumentKey::new(id);
        let mut docs = self.store.load_values(Collection::Documents)?;
        let (index, _) = key.resolve(&docs).ok_or_else(|| LedgerError::not_found(id))?;
        as_document(docs.swap_remove(index), id)
    }

    /// Replace the document `id` resolves to with `document`, whole.
    pub fn update(&self, id: &str, document: Record) -> LedgerResult<Record> {
        let key = DocumentKey::new(id);
        self.store
            .transact(Collection::Documents, |docs: &mut Vec<Value>| {
                let (index, field) = key.resolve(docs).ok_or_else(|| LedgerError::not_found(id))?;
                debug!(%key, field = field.field_name(), index, "document replaced");
                docs[index] = Value::Object(document.clone());
                Ok::<_, LedgerError>(())
            })?;
        Ok(document)
    }

    /// Remove every document whose `numero` or `codigo` is `id`.
    /// Returns how many were removed.
    pub fn delete(&self, id: &str) -> LedgerResult<usize> {
        let key = DocumentKey::new(id);
        self.store
            .transact(Collection::Documents, |docs: &mut Vec<Value>| {
                let before = docs.len();
                docs.retain(|d| !key.matches(d));
                match before - docs.len() {
                    0 => Err(LedgerError::not_found(id)),
                    removed => {
                        debug!(%key, removed, "documents deleted");
                        Ok(removed)
                    }
                }
            })
    }

    /// Convert the document `id` resolves to into `kind`.
    ///
    /// Sets `tipo_documento`, issues a number from the kind's series into
    /// its number field, and copies the kind's customer fields from
    /// `extra` (missing ones become `""`). Other fields are kept.
    pub fn change_type(&self, id: &str, kind: DocumentKind, extra: &Record) -> LedgerResult<Record> {
        let key = DocumentKey::new(id);
        self.store
            .transact(Collection::Documents, |docs: &mut Vec<Value>| {
                let (index, _) = key.resolve(docs).ok_or_else(|| LedgerError::not_found(id))?;
                let number = self.numbering.issue(kind.series(), docs)?;

                let doc = docs[index]
                    .as_object_mut()
                    .ok_or_else(|| LedgerError::not_found(id))?;
                doc.set_text("tipo_documento", kind.as_str());
                doc.set_text(kind.number_field(), number.as_str());
                for field in kind.customer_fields() {
                    let value = extra
                        .get(field)
                        .cloned()
                        .unwrap_or_else(|| Value::String(String::new()));
                    doc.insert(field.to_string(), value);
                }
                info!(%key, %kind, number = %number, "document type changed");
                Ok(doc.clone())
            })
    }

    /// Append a copy of the document `id` resolves to, with a fresh
    /// `numero`, today's `fecha_emision`, status [`DUPLICATE_STATUS`] and
    /// `es_duplicado = true`. The source is left untouched.
    pub fn duplicate(&self, id: &str) -> LedgerResult<Record> {
        let key = DocumentKey::new(id);
        self.store
            .transact(Collection::Documents, |docs: &mut Vec<Value>| {
                let (index, _) = key.resolve(docs).ok_or_else(|| LedgerError::not_found(id))?;
                let number = self.numbering.issue(DocumentSeries::Invoice, docs)?;

                let mut copy = as_document(docs[index].clone(), id)?;
                copy.set_text("numero", number.as_str());
                copy.set_text("fecha_emision", self.clock.today());
                copy.set_text("estado", DUPLICATE_STATUS);
                copy.set_flag("es_duplicado", true);
                docs.push(Value::Object(copy.clone()));
                info!(%key, number = %number, "document duplicated");
                Ok(copy)
            })
    }

    /// Documents matching every active criterion of `filter`, in order.
    pub fn search(&self, filter: &DocumentFilter) -> LedgerResult<Vec<Record>> {
        Ok(filter.apply(self.list()?))
    }
}

/// The record behind an element [`DocumentKey::resolve`] landed on.
fn as_document(value: Value, id: &str) -> LedgerResult<Record> {
    match value {
        Value::Object(document) => Ok(document),
        _ => Err(LedgerError::not_found(id)),
    }
}

impl std::fmt::Debug for DocumentLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentLedger").finish_non_exhaustive()
    }
}
