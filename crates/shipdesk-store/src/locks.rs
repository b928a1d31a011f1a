use std::sync::{Mutex, MutexGuard, PoisonError};

use shipdesk_types::Collection;

/// Exclusive access to one collection for the lifetime of the guard.
pub type CollectionGuard<'a> = MutexGuard<'a, ()>;

/// One mutex per collection.
///
/// The mutexes guard no data; they serialize load-mutate-save sequences.
/// A panic inside a critical section leaves nothing half-updated in memory,
/// so a poisoned mutex is simply taken over.
#[derive(Debug)]
pub struct CollectionLocks {
    locks: [Mutex<()>; Collection::COUNT],
}

impl CollectionLocks {
    pub fn new() -> Self {
        Self {
            locks: std::array::from_fn(|_| Mutex::new(())),
        }
    }

    /// Block until the collection is free, then hold it.
    pub fn lock(&self, collection: Collection) -> CollectionGuard<'_> {
        self.locks[collection as usize]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CollectionLocks {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_collection_has_its_own_lock() {
        let locks = CollectionLocks::new();
        let guards: Vec<_> = Collection::ALL.iter().map(|c| locks.lock(*c)).collect();
        assert_eq!(guards.len(), Collection::ALL.len());
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        use std::sync::Arc;
        use std::thread;

        let locks = Arc::new(CollectionLocks::new());
        let inner = Arc::clone(&locks);
        let result = thread::spawn(move || {
            let _guard = inner.lock(Collection::Packages);
            panic!("boom");
        })
        .join();
        assert!(result.is_err());

        let _guard = locks.lock(Collection::Packages);
    }
}
