use std::sync::Arc;

use serde_json::Value;
use shipdesk_store::{RecordStore, RecordStoreExt};
use shipdesk_types::{Clock, Collection};
use tracing::debug;

use crate::entry::{AuditAction, AuditEntry};
use crate::error::{AuditError, AuditResult};

/// The audit history, persisted as the `Audit` collection of strings.
#[derive(Clone)]
pub struct AuditLog {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
}

impl AuditLog {
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Append one line verbatim. Existing elements are kept as they are.
    pub fn append(&self, line: impl Into<String>) -> AuditResult<()> {
        let line = line.into();
        self.store
            .transact(Collection::Audit, |entries: &mut Vec<Value>| {
                entries.push(Value::String(line));
                Ok::<_, AuditError>(())
            })
    }

    /// Stamp `action` on `code` with the current time and append it.
    /// Returns the entry as written.
    pub fn record(&self, action: AuditAction, code: &str) -> AuditResult<AuditEntry> {
        let entry = AuditEntry::new(self.clock.timestamp(), action, code);
        self.append(entry.to_string())?;
        debug!(%action, code, "audit entry appended");
        Ok(entry)
    }

    /// Every line, oldest first. Elements that are not strings are skipped.
    pub fn list(&self) -> AuditResult<Vec<String>> {
        Ok(self.store.load(Collection::Audit)?)
    }

    /// Every line that parses as an [`AuditEntry`], oldest first.
    pub fn entries(&self) -> AuditResult<Vec<AuditEntry>> {
        Ok(self
            .list()?
            .iter()
            .filter_map(|line| AuditEntry::parse(line))
            .collect())
    }
}

impl std::fmt::Debug for AuditLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditLog").finish_non_exhaustive()
    }
}
