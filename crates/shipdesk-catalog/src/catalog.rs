use std::sync::Arc;

use serde_json::Value;
use shipdesk_audit::{AuditAction, AuditLog};
use shipdesk_store::{RecordStore, RecordStoreExt};
use shipdesk_types::{Collection, Record, RecordExt};
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};

/// Field identifying a package.
pub const PACKAGE_KEY: &str = "codigo";

/// CRUD over the `Packages` collection.
///
/// The package collection guard is released before the audit entry is
/// written, so the catalog never holds two collection guards at once.
#[derive(Clone)]
pub struct PackageCatalog {
    store: Arc<dyn RecordStore>,
    audit: AuditLog,
}

impl PackageCatalog {
    pub fn new(store: Arc<dyn RecordStore>, audit: AuditLog) -> Self {
        Self { store, audit }
    }

    /// All packages in insertion order.
    pub fn list(&self) -> CatalogResult<Vec<Record>> {
        Ok(self.store.load(Collection::Packages)?)
    }

    /// Append a package. Duplicate codes are not rejected.
    pub fn create(&self, package: Record) -> CatalogResult<Record> {
        let code = key_text(&package);
        self.store
            .transact(Collection::Packages, |packages: &mut Vec<Value>| {
                packages.push(Value::Object(package.clone()));
                Ok::<_, CatalogError>(())
            })?;
        self.audit.record(AuditAction::Registered, &code)?;
        debug!(code = %code, "package registered");
        Ok(package)
    }

    /// Replace the first package whose code equals `package`'s code.
    ///
    /// Only object elements are candidates. Returns `false` when nothing
    /// matched; the collection is then left as it was, but the edit is
    /// still audited.
    pub fn update(&self, package: Record) -> CatalogResult<bool> {
        let code = key_text(&package);
        let key = package.get(PACKAGE_KEY).cloned();
        let replaced = self
            .store
            .transact(Collection::Packages, |packages: &mut Vec<Value>| {
                let slot = packages
                    .iter_mut()
                    .find(|p| p.is_object() && p.get(PACKAGE_KEY) == key.as_ref());
                Ok::<_, CatalogError>(match slot {
                    Some(existing) => {
                        *existing = Value::Object(package);
                        true
                    }
                    None => false,
                })
            })?;
        self.audit.record(AuditAction::Edited, &code)?;
        debug!(code = %code, replaced, "package edit");
        Ok(replaced)
    }

    /// Remove every package with the given code. Returns how many were
    /// removed; the deletion is audited even when that is zero.
    pub fn delete(&self, code: &str) -> CatalogResult<usize> {
        let removed = self
            .store
            .transact(Collection::Packages, |packages: &mut Vec<Value>| {
                let before = packages.len();
                packages.retain(|p| {
                    !p.as_object()
                        .is_some_and(|p| p.field_equals(PACKAGE_KEY, code))
                });
                Ok::<_, CatalogError>(before - packages.len())
            })?;
        self.audit.record(AuditAction::Deleted, code)?;
        debug!(code, removed, "package delete");
        Ok(removed)
    }
}

/// The package code as it appears in audit lines. An absent or null code
/// reads `None` and booleans read `True`/`False`, the text earlier
/// versions of the back office wrote.
fn key_text(package: &Record) -> String {
    match package.get(PACKAGE_KEY) {
        Some(Value::String(code)) => code.clone(),
        Some(Value::Null) | None => "None".to_string(),
        Some(Value::Bool(true)) => "True".to_string(),
        Some(Value::Bool(false)) => "False".to_string(),
        Some(other) => other.to_string(),
    }
}

impl std::fmt::Debug for PackageCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageCatalog").finish_non_exhaustive()
    }
}
