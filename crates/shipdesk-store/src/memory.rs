use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;
use shipdesk_types::Collection;

use crate::error::StoreResult;
use crate::locks::{CollectionGuard, CollectionLocks};
use crate::traits::RecordStore;

/// In-memory, HashMap-based record store.
///
/// Intended for tests and embedding. Collections are held as JSON values
/// behind a `RwLock`; values are cloned on load and save, so callers never
/// share state with the store.
pub struct InMemoryRecordStore {
    collections: RwLock<HashMap<Collection, Vec<Value>>>,
    locks: CollectionLocks,
}

impl InMemoryRecordStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            locks: CollectionLocks::new(),
        }
    }

    /// Number of records currently stored in a collection.
    pub fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .expect("lock poisoned")
            .get(&collection)
            .map_or(0, Vec::len)
    }

    /// Returns `true` if no collection holds any record.
    pub fn is_empty(&self) -> bool {
        self.collections
            .read()
            .expect("lock poisoned")
            .values()
            .all(Vec::is_empty)
    }

    /// Remove every collection.
    pub fn clear(&self) {
        self.collections.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn load_values(&self, collection: Collection) -> StoreResult<Vec<Value>> {
        let map = self.collections.read().expect("lock poisoned");
        Ok(map.get(&collection).cloned().unwrap_or_default())
    }

    fn save_values(&self, collection: Collection, values: &[Value]) -> StoreResult<()> {
        let mut map = self.collections.write().expect("lock poisoned");
        map.insert(collection, values.to_vec());
        Ok(())
    }

    fn lock(&self, collection: Collection) -> CollectionGuard<'_> {
        self.locks.lock(collection)
    }
}

impl std::fmt::Debug for InMemoryRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.collections.read().expect("lock poisoned").len();
        f.debug_struct("InMemoryRecordStore")
            .field("collection_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::traits::RecordStoreExt;
    use serde_json::json;

    #[test]
    fn load_missing_collection_is_empty() {
        let store = InMemoryRecordStore::new();
        assert!(store.load_values(Collection::Audit).unwrap().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let store = InMemoryRecordStore::new();
        let values = vec![json!({"codigo": "P1"}), json!({"codigo": "P2"})];
        store.save_values(Collection::Packages, &values).unwrap();
        assert_eq!(store.load_values(Collection::Packages).unwrap(), values);
        assert_eq!(store.len(Collection::Packages), 2);
    }

    #[test]
    fn typed_strings_roundtrip() {
        let store = InMemoryRecordStore::new();
        let entries = vec!["uno".to_string(), "dos".to_string()];
        store.save(Collection::Audit, &entries).unwrap();
        let loaded: Vec<String> = store.load(Collection::Audit).unwrap();
        assert_eq!(loaded, entries);
    }

    #[test]
    fn transact_appends() {
        let store = InMemoryRecordStore::new();
        for n in 0..3 {
            store
                .transact(Collection::Audit, |entries: &mut Vec<Value>| {
                    entries.push(Value::String(format!("entry {n}")));
                    Ok::<_, StoreError>(())
                })
                .unwrap();
        }
        assert_eq!(store.len(Collection::Audit), 3);
    }

    #[test]
    fn typed_load_skips_mismatched_entries() {
        let store = InMemoryRecordStore::new();
        store
            .save_values(Collection::Audit, &[json!("uno"), json!({"nota": 1}), json!("dos")])
            .unwrap();
        let loaded: Vec<String> = store.load(Collection::Audit).unwrap();
        assert_eq!(loaded, vec!["uno".to_string(), "dos".to_string()]);
        assert_eq!(store.len(Collection::Audit), 3);
    }

    #[test]
    fn clear_removes_all() {
        let store = InMemoryRecordStore::new();
        store.save_values(Collection::Users, &[json!({})]).unwrap();
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn usable_as_trait_object() {
        use std::sync::Arc;

        let store: Arc<dyn RecordStore> = Arc::new(InMemoryRecordStore::new());
        store.save(Collection::Transactions, &[json!({"monto": 5})]).unwrap();
        let loaded: Vec<Value> = store.load(Collection::Transactions).unwrap();
        assert_eq!(loaded, vec![json!({"monto": 5})]);
    }

    #[test]
    fn debug_format() {
        let store = InMemoryRecordStore::new();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryRecordStore"));
    }
}
