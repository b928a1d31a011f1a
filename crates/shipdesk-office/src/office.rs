use std::sync::Arc;

use shipdesk_audit::{AuditEntry, AuditLog};
use shipdesk_catalog::PackageCatalog;
use shipdesk_directory::{Account, AdminProfile, Directory};
use shipdesk_ledger::{DocumentFilter, DocumentKind, DocumentLedger, TransactionLog};
use shipdesk_store::{InMemoryRecordStore, JsonFileStore, RecordStore, StoreConfig};
use shipdesk_types::{Clock, Record, SystemClock};
use tracing::info;

use crate::error::OfficeResult;

/// High-level back office API.
#[derive(Clone)]
pub struct BackOffice {
    store: Arc<dyn RecordStore>,
    audit: AuditLog,
    catalog: PackageCatalog,
    directory: Directory,
    ledger: DocumentLedger,
    transactions: TransactionLog,
}

impl BackOffice {
    /// Wire every component over `store` and `clock`.
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        let audit = AuditLog::new(store.clone(), clock.clone());
        Self {
            catalog: PackageCatalog::new(store.clone(), audit.clone()),
            directory: Directory::new(store.clone()),
            ledger: DocumentLedger::new(store.clone(), clock),
            transactions: TransactionLog::new(store.clone()),
            audit,
            store,
        }
    }

    /// Open a durable back office in `config`'s data directory, on the
    /// system clock.
    pub fn open(config: StoreConfig) -> OfficeResult<Self> {
        let store = JsonFileStore::open(config)?;
        info!(data_dir = %store.data_dir().display(), "back office opened");
        Ok(Self::new(Arc::new(store), Arc::new(SystemClock)))
    }

    /// A back office that persists nothing.
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        Self::new(Arc::new(InMemoryRecordStore::new()), clock)
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    // ---- Packages ----

    pub fn list_packages(&self) -> OfficeResult<Vec<Record>> {
        Ok(self.catalog.list()?)
    }

    pub fn create_package(&self, package: Record) -> OfficeResult<Record> {
        Ok(self.catalog.create(package)?)
    }

    /// Returns whether a package was replaced.
    pub fn update_package(&self, package: Record) -> OfficeResult<bool> {
        Ok(self.catalog.update(package)?)
    }

    /// Returns how many packages were removed.
    pub fn delete_package(&self, code: &str) -> OfficeResult<usize> {
        Ok(self.catalog.delete(code)?)
    }

    // ---- Audit ----

    pub fn list_audit(&self) -> OfficeResult<Vec<String>> {
        Ok(self.audit.list()?)
    }

    pub fn audit_entries(&self) -> OfficeResult<Vec<AuditEntry>> {
        Ok(self.audit.entries()?)
    }

    // ---- Documents ----

    pub fn list_documents(&self) -> OfficeResult<Vec<Record>> {
        Ok(self.ledger.list()?)
    }

    pub fn create_document(&self, document: Record) -> OfficeResult<Record> {
        Ok(self.ledger.create(document)?)
    }

    pub fn get_document(&self, id: &str) -> OfficeResult<Record> {
        Ok(self.ledger.get(id)?)
    }

    pub fn update_document(&self, id: &str, document: Record) -> OfficeResult<Record> {
        Ok(self.ledger.update(id, document)?)
    }

    pub fn delete_document(&self, id: &str) -> OfficeResult<usize> {
        Ok(self.ledger.delete(id)?)
    }

    /// Convert a document to the type named `kind` (`"boleta"` or
    /// `"factura"`).
    pub fn change_document_type(&self, id: &str, kind: &str, extra: &Record) -> OfficeResult<Record> {
        let kind: DocumentKind = kind.parse()?;
        Ok(self.ledger.change_type(id, kind, extra)?)
    }

    pub fn duplicate_document(&self, id: &str) -> OfficeResult<Record> {
        Ok(self.ledger.duplicate(id)?)
    }

    pub fn search_documents(&self, filter: &DocumentFilter) -> OfficeResult<Vec<Record>> {
        Ok(self.ledger.search(filter)?)
    }

    // ---- Transactions ----

    pub fn list_transactions(&self) -> OfficeResult<Vec<Record>> {
        Ok(self.transactions.list()?)
    }

    pub fn create_transaction(&self, transaction: Record) -> OfficeResult<Record> {
        Ok(self.transactions.create(transaction)?)
    }

    // ---- Users & employees ----

    pub fn list_users(&self) -> OfficeResult<Vec<Record>> {
        Ok(self.directory.list_users()?)
    }

    pub fn register_user(&self, user: Record) -> OfficeResult<Record> {
        Ok(self.directory.register_user(user)?)
    }

    pub fn delete_user(&self, usuario: &str) -> OfficeResult<usize> {
        Ok(self.directory.delete_user(usuario)?)
    }

    pub fn list_employees(&self) -> OfficeResult<Vec<Record>> {
        Ok(self.directory.list_employees()?)
    }

    pub fn register_employee(&self, employee: Record) -> OfficeResult<Record> {
        Ok(self.directory.register_employee(employee)?)
    }

    pub fn find_account(&self, login: &str) -> OfficeResult<Option<Account>> {
        Ok(self.directory.find_account(login)?)
    }

    /// Insert the administrator account unless it exists. Returns whether
    /// it was inserted.
    pub fn seed_admin(&self, profile: &AdminProfile) -> OfficeResult<bool> {
        Ok(self.directory.seed_admin(profile)?)
    }
}

impl std::fmt::Debug for BackOffice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackOffice").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use shipdesk_types::{Collection, FixedClock, RecordExt};

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn office() -> BackOffice {
        BackOffice::in_memory(Arc::new(FixedClock::parse("2024-06-01 08:00:00").unwrap()))
    }

    #[test]
    fn package_mutations_are_audited() {
        let office = office();
        office.create_package(record(json!({"codigo": "P1"}))).unwrap();
        assert!(!office.update_package(record(json!({"codigo": "P9"}))).unwrap());
        assert_eq!(office.delete_package("P1").unwrap(), 1);

        assert_eq!(
            office.list_audit().unwrap(),
            vec![
                "[2024-06-01 08:00:00] Registró paquete P1",
                "[2024-06-01 08:00:00] Editó paquete P9",
                "[2024-06-01 08:00:00] Eliminó paquete P1",
            ]
        );
        assert!(office.list_packages().unwrap().is_empty());
    }

    #[test]
    fn change_type_by_name() {
        let office = office();
        office.create_document(record(json!({"codigo": "X1"}))).unwrap();
        let doc = office
            .change_document_type("X1", "factura", &record(json!({"razon_social": "Acme"})))
            .unwrap();
        assert_eq!(doc.text("numero_factura"), "F001-0001");
    }

    #[test]
    fn unknown_kind_is_invalid_input() {
        let office = office();
        office.create_document(record(json!({"codigo": "X1"}))).unwrap();
        let err = office
            .change_document_type("X1", "recibo", &Record::new())
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert!(!err.is_not_found());
        assert_eq!(office.list_documents().unwrap(), vec![record(json!({"codigo": "X1"}))]);
    }

    #[test]
    fn missing_document_is_not_found() {
        let office = office();
        assert!(office.get_document("X1").unwrap_err().is_not_found());
        assert!(office.duplicate_document("X1").unwrap_err().is_not_found());
        assert!(office.delete_document("X1").unwrap_err().is_not_found());
    }

    #[test]
    fn transactions_and_users_share_one_store() {
        let office = office();
        office.create_transaction(record(json!({"id": "T1"}))).unwrap();
        office.register_user(record(json!({"usuario": "ana"}))).unwrap();
        assert_eq!(office.list_transactions().unwrap().len(), 1);
        assert_eq!(office.list_users().unwrap()[0].text("rol"), "Cliente");
        assert_eq!(
            office.store().load_values(Collection::Transactions).unwrap().len(),
            1
        );
    }

    #[test]
    fn open_persists_to_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        {
            let office = BackOffice::open(StoreConfig::new(dir.path())).unwrap();
            office.create_package(record(json!({"codigo": "P1"}))).unwrap();
            assert!(office.seed_admin(&AdminProfile::default()).unwrap());
        }
        assert!(dir.path().join("paquetes.txt").exists());
        assert!(dir.path().join("historial.txt").exists());

        let office = BackOffice::open(StoreConfig::new(dir.path())).unwrap();
        assert_eq!(office.list_packages().unwrap().len(), 1);
        assert!(!office.seed_admin(&AdminProfile::default()).unwrap());
        assert!(office.find_account("admin").unwrap().is_some());
    }

    #[test]
    fn history_with_foreign_entries_survives_package_writes() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonFileStore::open(StoreConfig::new(dir.path())).unwrap());
        std::fs::write(
            store.path_of(Collection::Audit),
            r#"["[2024-05-31 17:00:00] Registró paquete P0", {"nota": "legacy"}]"#,
        )
        .unwrap();
        std::fs::write(store.path_of(Collection::Documents), r#"[null, {"codigo": "X1"}]"#).unwrap();
        let clock = Arc::new(FixedClock::parse("2024-06-01 08:00:00").unwrap());
        let office = BackOffice::new(store.clone(), clock);

        office.create_package(record(json!({"codigo": "P1"}))).unwrap();
        office.create_document(record(json!({"codigo": "X2"}))).unwrap();

        let history = store.load_values(Collection::Audit).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[1], json!({"nota": "legacy"}));
        assert_eq!(history[2], json!("[2024-06-01 08:00:00] Registró paquete P1"));
        assert_eq!(office.list_audit().unwrap().len(), 2);

        let documents = store.load_values(Collection::Documents).unwrap();
        assert_eq!(documents.len(), 3);
        assert_eq!(documents[0], Value::Null);
    }
}
