use std::sync::Arc;

use serde_json::Value;
use shipdesk_store::{RecordStore, RecordStoreExt};
use shipdesk_types::{Collection, Record};
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};

/// Payment transactions, persisted as the `Transactions` collection.
/// Append and list only.
#[derive(Clone)]
pub struct TransactionLog {
    store: Arc<dyn RecordStore>,
}

impl TransactionLog {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> LedgerResult<Vec<Record>> {
        Ok(self.store.load(Collection::Transactions)?)
    }

    /// Append `transaction` unchanged and return it.
    pub fn create(&self, transaction: Record) -> LedgerResult<Record> {
        self.store
            .transact(Collection::Transactions, |txs: &mut Vec<Value>| {
                txs.push(Value::Object(transaction.clone()));
                debug!(count = txs.len(), "transaction recorded");
                Ok::<_, LedgerError>(())
            })?;
        Ok(transaction)
    }
}

impl std::fmt::Debug for TransactionLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionLog").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shipdesk_store::InMemoryRecordStore;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn create_then_list_in_order() {
        let log = TransactionLog::new(Arc::new(InMemoryRecordStore::new()));
        log.create(record(json!({"id": "T1", "monto": 20.0}))).unwrap();
        log.create(record(json!({"id": "T2", "monto": 5}))).unwrap();

        let ids: Vec<Value> = log.list().unwrap().into_iter().map(|t| t["id"].clone()).collect();
        assert_eq!(ids, vec![json!("T1"), json!("T2")]);
    }

    #[test]
    fn create_adds_no_fields() {
        let log = TransactionLog::new(Arc::new(InMemoryRecordStore::new()));
        let tx = record(json!({"id": "T1"}));
        assert_eq!(log.create(tx.clone()).unwrap(), tx);
        assert_eq!(log.list().unwrap(), vec![tx]);
    }

    #[test]
    fn create_keeps_existing_elements_of_any_shape() {
        let store = Arc::new(InMemoryRecordStore::new());
        store
            .save_values(Collection::Transactions, &[json!(42), json!({"id": "T0"})])
            .unwrap();
        let log = TransactionLog::new(store.clone());

        log.create(record(json!({"id": "T1"}))).unwrap();
        assert_eq!(
            store.load_values(Collection::Transactions).unwrap(),
            vec![json!(42), json!({"id": "T0"}), json!({"id": "T1"})]
        );
        assert_eq!(log.list().unwrap().len(), 2);
    }
}
