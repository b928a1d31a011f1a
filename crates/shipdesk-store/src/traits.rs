use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shipdesk_types::Collection;
use tracing::warn;

use crate::error::{StoreError, StoreResult};
use crate::locks::CollectionGuard;

/// Named-collection record store.
///
/// All implementations must satisfy these invariants:
/// - `load_values` of a collection that was never saved returns an empty
///   sequence; so does a collection whose persisted content is not a JSON
///   array. Neither case is an error.
/// - `save_values` fully replaces the collection. A reader observes either
///   the previous sequence or the new one.
/// - Insertion order is preserved exactly.
/// - `lock` hands out at most one guard per collection at a time.
pub trait RecordStore: Send + Sync {
    /// Read a collection as raw JSON values.
    fn load_values(&self, collection: Collection) -> StoreResult<Vec<Value>>;

    /// Replace a collection with the given values.
    fn save_values(&self, collection: Collection, values: &[Value]) -> StoreResult<()>;

    /// Take the collection's mutual-exclusion guard.
    ///
    /// Plain `load_values`/`save_values` do not take it; callers that
    /// read, modify, and write back hold it across all three steps.
    fn lock(&self, collection: Collection) -> CollectionGuard<'_>;
}

/// Typed and transactional helpers available on every [`RecordStore`].
pub trait RecordStoreExt: RecordStore {
    /// Read a collection decoded as `T`.
    ///
    /// Elements that do not decode as `T` are skipped with a warning; the
    /// rest are returned in order.
    fn load<T: DeserializeOwned>(&self, collection: Collection) -> StoreResult<Vec<T>> {
        let values = self.load_values(collection)?;
        let total = values.len();
        let items: Vec<T> = values
            .into_iter()
            .filter_map(|value| serde_json::from_value(value).ok())
            .collect();
        if items.len() < total {
            warn!(
                %collection,
                skipped = total - items.len(),
                "collection has elements of unexpected shape; skipping them"
            );
        }
        Ok(items)
    }

    /// Replace a collection with `items`.
    fn save<T: Serialize>(&self, collection: Collection, items: &[T]) -> StoreResult<()> {
        let values = items
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::Serialization {
                collection,
                reason: e.to_string(),
            })?;
        self.save_values(collection, &values)
    }

    /// Load, mutate, and save a collection as one critical section.
    ///
    /// `mutate` sees every persisted element as a raw value, whatever its
    /// shape, so elements it does not touch are written back unchanged.
    /// The collection guard is held for the whole sequence. The mutated
    /// sequence is written back only when `mutate` returns `Ok`; on `Err`
    /// the persisted collection is left untouched.
    fn transact<R, E, F>(&self, collection: Collection, mutate: F) -> Result<R, E>
    where
        E: From<StoreError>,
        F: FnOnce(&mut Vec<Value>) -> Result<R, E>,
    {
        let _guard = self.lock(collection);
        let mut values = self.load_values(collection)?;
        let outcome = mutate(&mut values)?;
        self.save_values(collection, &values)?;
        Ok(outcome)
    }
}

impl<S: RecordStore + ?Sized> RecordStoreExt for S {}
