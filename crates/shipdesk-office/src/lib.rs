//! The shipdesk back office.
//!
//! [`BackOffice`] wires every component over one record store and one
//! clock, and exposes the operations outer layers (HTTP, CLI) call. This is
//! the main entry point for applications embedding shipdesk.

pub mod error;
pub mod office;

pub use error::{OfficeError, OfficeResult};
pub use office::BackOffice;

// Re-export key types
pub use shipdesk_audit::{AuditAction, AuditEntry};
pub use shipdesk_directory::{Account, AccountKind, AdminProfile};
pub use shipdesk_ledger::{DocumentFilter, DocumentKind, SeriesCounter};
pub use shipdesk_store::StoreConfig;
pub use shipdesk_types::Record;
