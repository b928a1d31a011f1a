//! Billing document ledger for the shipdesk back office.
//!
//! This crate is the heart of shipdesk. It provides:
//! - [`DocumentLedger`]: CRUD over invoices (`factura`) and receipts
//!   (`boleta`), type conversion between them, and duplication
//! - [`DocumentKey`]: identifier resolution over the two legacy key fields
//!   with an explicit precedence rule
//! - [`Numbering`]: monotonic, persisted document numbers per series
//! - [`DocumentFilter`]: the multi-predicate document search
//! - [`TransactionLog`]: the append-only payment transaction collection

pub mod error;
pub mod key;
pub mod kind;
pub mod ledger;
pub mod numbering;
pub mod search;
pub mod transactions;

pub use error::{LedgerError, LedgerResult};
pub use key::{DocumentKey, KeyField};
pub use kind::DocumentKind;
pub use ledger::{DocumentLedger, DUPLICATE_STATUS};
pub use numbering::{DocumentSeries, Numbering, SeriesCounter};
pub use search::DocumentFilter;
pub use transactions::TransactionLog;
