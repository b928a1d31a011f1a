//! Record storage for the shipdesk back office.
//!
//! A collection is an ordered sequence of semi-structured records persisted
//! as a single pretty-printed JSON array. Every component (audit log,
//! package catalog, document ledger, transaction log, directory) reads and
//! writes through this crate.
//!
//! # Storage Backends
//!
//! All backends implement the [`RecordStore`] trait:
//!
//! - [`JsonFileStore`] -- one file per collection under a configured data directory
//! - [`InMemoryRecordStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Loading is lenient: a missing or unparseable collection reads as empty.
//! 2. Saving fully replaces a collection. The file on disk is always either
//!    the previous content or the new content, never a partial write.
//! 3. Load-mutate-save goes through [`RecordStoreExt::transact`], which holds
//!    the collection's guard for the whole sequence. Mutations on one
//!    collection never interleave; different collections proceed in parallel.
//! 4. The store never interprets record contents. `transact` hands callers
//!    raw values, so an element of unexpected shape survives every write.

pub mod config;
pub mod error;
pub mod fs;
pub mod locks;
pub mod memory;
pub mod traits;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use fs::JsonFileStore;
pub use locks::{CollectionGuard, CollectionLocks};
pub use memory::InMemoryRecordStore;
pub use traits::{RecordStore, RecordStoreExt};
