//! Append-only audit history.
//!
//! Every package mutation leaves one human-readable line in the `Audit`
//! collection, `"[<timestamp>] <verb> paquete <code>"`. Entries are never
//! edited or removed; the log is read back oldest first.

pub mod entry;
pub mod error;
pub mod log;

pub use entry::{AuditAction, AuditEntry};
pub use error::{AuditError, AuditResult};
pub use log::AuditLog;
