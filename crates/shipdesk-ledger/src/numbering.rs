//! Document numbers.
//!
//! A number is `<series>-<n>` with `n` zero-padded to four digits. Each
//! series keeps its last issued `n` in the `Sequences` collection, and the
//! next `n` is the largest of:
//!
//! - the ledger's current length,
//! - the last issued `n` plus one,
//! - the highest `n` already present on any ledger document plus one.
//!
//! On a fresh ledger this is the ledger length. Once numbers have been
//! issued they are never issued again, even after documents are deleted.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shipdesk_store::{RecordStore, RecordStoreExt};
use shipdesk_types::{Collection, RecordExt};
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};

/// Document fields that may hold a series number.
const NUMBER_FIELDS: [&str; 3] = ["numero", "numero_factura", "numero_boleta"];

/// A numbering series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentSeries {
    /// `F001`: invoices and duplicated documents.
    Invoice,
    /// `B001`: receipts.
    Receipt,
}

impl DocumentSeries {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Invoice => "F001",
            Self::Receipt => "B001",
        }
    }

    /// `F001-0007`.
    pub fn format(&self, n: u64) -> String {
        format!("{}-{:04}", self.prefix(), n)
    }

    /// The `n` of a number in this series, if `number` is one.
    pub fn parse(&self, number: &str) -> Option<u64> {
        let digits = number.strip_prefix(self.prefix())?.strip_prefix('-')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    /// Highest `n` of this series on any of `documents`. Elements that are
    /// not objects carry no number.
    pub fn highest_in(&self, documents: &[Value]) -> Option<u64> {
        documents
            .iter()
            .filter_map(Value::as_object)
            .flat_map(|r| NUMBER_FIELDS.iter().filter_map(move |f| r.str_field(f)))
            .filter_map(|number| self.parse(number))
            .max()
    }
}

/// Persisted state of one series.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesCounter {
    pub serie: String,
    pub ultimo: u64,
}

/// Issues document numbers.
#[derive(Clone)]
pub struct Numbering {
    store: Arc<dyn RecordStore>,
}

impl Numbering {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Issue the next number of `series` for a ledger currently holding
    /// `ledger`.
    ///
    /// Callers hold the `Documents` guard; this takes the `Sequences`
    /// guard inside it.
    pub fn issue(&self, series: DocumentSeries, ledger: &[Value]) -> LedgerResult<String> {
        let floor = (ledger.len() as u64).max(series.highest_in(ledger).map_or(0, |n| n + 1));
        let n = self
            .store
            .transact(Collection::Sequences, |counters: &mut Vec<Value>| {
                let slot = counters
                    .iter()
                    .position(|c| c.get("serie").and_then(Value::as_str) == Some(series.prefix()));
                let last = slot
                    .and_then(|i| counters[i].get("ultimo"))
                    .and_then(Value::as_u64)
                    .unwrap_or(0);
                let next = floor.max(last + 1);
                let counter = json!({"serie": series.prefix(), "ultimo": next});
                match slot {
                    Some(i) => counters[i] = counter,
                    None => counters.push(counter),
                }
                Ok::<_, LedgerError>(next)
            })?;
        let number = series.format(n);
        debug!(series = series.prefix(), number = %number, "document number issued");
        Ok(number)
    }

    /// Last issued `n` per series. Malformed counters are skipped.
    pub fn counters(&self) -> LedgerResult<Vec<SeriesCounter>> {
        Ok(self.store.load(Collection::Sequences)?)
    }
}

impl std::fmt::Debug for Numbering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Numbering").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipdesk_store::InMemoryRecordStore;

    fn ledger_of(len: usize) -> Vec<Value> {
        (0..len).map(|i| json!({"codigo": format!("D{i}")})).collect()
    }

    // -----------------------------------------------------------------------
    // Formatting
    // -----------------------------------------------------------------------

    #[test]
    fn format_pads_to_four_digits() {
        assert_eq!(DocumentSeries::Invoice.format(1), "F001-0001");
        assert_eq!(DocumentSeries::Receipt.format(42), "B001-0042");
        assert_eq!(DocumentSeries::Invoice.format(12345), "F001-12345");
    }

    #[test]
    fn parse_inverts_format() {
        assert_eq!(DocumentSeries::Invoice.parse("F001-0009"), Some(9));
        assert_eq!(DocumentSeries::Invoice.parse("B001-0009"), None);
        assert_eq!(DocumentSeries::Receipt.parse("B001-"), None);
        assert_eq!(DocumentSeries::Receipt.parse("B001-12a"), None);
        assert_eq!(DocumentSeries::Receipt.parse("B001-+12"), None);
    }

    #[test]
    fn highest_in_scans_all_number_fields() {
        let docs = vec![
            json!({"numero": "F001-0003"}),
            json!({"numero_factura": "F001-0011"}),
            Value::Null,
            json!({"numero_boleta": "B001-0050"}),
        ];
        assert_eq!(DocumentSeries::Invoice.highest_in(&docs), Some(11));
        assert_eq!(DocumentSeries::Receipt.highest_in(&docs), Some(50));
        assert_eq!(DocumentSeries::Invoice.highest_in(&[]), None);
    }

    // -----------------------------------------------------------------------
    // Issuing
    // -----------------------------------------------------------------------

    #[test]
    fn fresh_ledger_issues_its_length() {
        for len in 1..5 {
            let numbering = Numbering::new(Arc::new(InMemoryRecordStore::new()));
            let number = numbering.issue(DocumentSeries::Invoice, &ledger_of(len)).unwrap();
            assert_eq!(number, DocumentSeries::Invoice.format(len as u64));
        }
    }

    #[test]
    fn repeated_issue_on_same_length_never_repeats() {
        let numbering = Numbering::new(Arc::new(InMemoryRecordStore::new()));
        let ledger = ledger_of(1);
        let a = numbering.issue(DocumentSeries::Invoice, &ledger).unwrap();
        let b = numbering.issue(DocumentSeries::Invoice, &ledger).unwrap();
        assert_eq!(a, "F001-0001");
        assert_eq!(b, "F001-0002");
    }

    #[test]
    fn shrinking_ledger_does_not_reuse_numbers() {
        let numbering = Numbering::new(Arc::new(InMemoryRecordStore::new()));
        assert_eq!(numbering.issue(DocumentSeries::Invoice, &ledger_of(5)).unwrap(), "F001-0005");
        assert_eq!(numbering.issue(DocumentSeries::Invoice, &ledger_of(2)).unwrap(), "F001-0006");
    }

    #[test]
    fn existing_numbers_on_documents_are_skipped() {
        let numbering = Numbering::new(Arc::new(InMemoryRecordStore::new()));
        let ledger = vec![json!({"numero": "F001-0001"})];
        assert_eq!(numbering.issue(DocumentSeries::Invoice, &ledger).unwrap(), "F001-0002");
    }

    #[test]
    fn series_are_independent() {
        let numbering = Numbering::new(Arc::new(InMemoryRecordStore::new()));
        let ledger = ledger_of(3);
        assert_eq!(numbering.issue(DocumentSeries::Invoice, &ledger).unwrap(), "F001-0003");
        assert_eq!(numbering.issue(DocumentSeries::Receipt, &ledger).unwrap(), "B001-0003");

        let counters = numbering.counters().unwrap();
        assert_eq!(counters.len(), 2);
        assert!(counters.iter().all(|c| c.ultimo == 3));
    }

    #[test]
    fn counters_persist_in_sequences_collection() {
        let store = Arc::new(InMemoryRecordStore::new());
        Numbering::new(store.clone())
            .issue(DocumentSeries::Invoice, &ledger_of(4))
            .unwrap();
        assert_eq!(
            store.load_values(Collection::Sequences).unwrap(),
            vec![json!({"serie": "F001", "ultimo": 4})]
        );
    }

    #[test]
    fn malformed_counters_are_kept() {
        let store = Arc::new(InMemoryRecordStore::new());
        store
            .save_values(
                Collection::Sequences,
                &[json!("legacy"), json!({"serie": "F001", "ultimo": 7})],
            )
            .unwrap();

        let numbering = Numbering::new(store.clone());
        assert_eq!(numbering.issue(DocumentSeries::Invoice, &ledger_of(1)).unwrap(), "F001-0008");
        assert_eq!(numbering.issue(DocumentSeries::Receipt, &ledger_of(1)).unwrap(), "B001-0001");
        assert_eq!(
            store.load_values(Collection::Sequences).unwrap(),
            vec![
                json!("legacy"),
                json!({"serie": "F001", "ultimo": 8}),
                json!({"serie": "B001", "ultimo": 1}),
            ]
        );
        assert_eq!(numbering.counters().unwrap().len(), 2);
    }
}
