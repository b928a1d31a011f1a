//! Package catalog.
//!
//! Packages are open records keyed by their `codigo` field. Every create,
//! update, and delete appends exactly one entry to the audit log, whether
//! or not the mutation matched a record.

pub mod catalog;
pub mod error;

pub use catalog::{PackageCatalog, PACKAGE_KEY};
pub use error::{CatalogError, CatalogResult};
