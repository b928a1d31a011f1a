use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use shipdesk_store::{RecordStore, RecordStoreExt};
use shipdesk_types::{Collection, Record, RecordExt};
use tracing::{debug, info};

use crate::admin::AdminProfile;
use crate::error::{DirectoryError, DirectoryResult};

/// Role given to self-registered users that do not name one.
pub const DEFAULT_ROLE: &str = "Cliente";

/// Which collection an account was found in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AccountKind {
    #[serde(rename = "usuario")]
    User,
    #[serde(rename = "empleado")]
    Employee,
}

impl AccountKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "usuario",
            Self::Employee => "empleado",
        }
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A login resolved to its owning record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Account {
    pub kind: AccountKind,
    pub record: Record,
}

impl Account {
    /// Fields an external credential checker needs: `tipo`, `usuario`,
    /// `nombre` and `rol`. Missing fields are `null`; nothing else from the
    /// record (the password in particular) is copied.
    pub fn summary(&self) -> Record {
        let mut summary = Record::new();
        summary.insert("tipo".into(), Value::String(self.kind.as_str().into()));
        for field in ["usuario", "nombre", "rol"] {
            let value = self.record.get(field).cloned().unwrap_or(Value::Null);
            summary.insert(field.into(), value);
        }
        summary
    }
}

/// Users and employees.
#[derive(Clone)]
pub struct Directory {
    store: Arc<dyn RecordStore>,
}

impl Directory {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    // ---- Users ----

    pub fn list_users(&self) -> DirectoryResult<Vec<Record>> {
        Ok(self.store.load(Collection::Users)?)
    }

    /// Append a user, defaulting `rol` to [`DEFAULT_ROLE`] when absent.
    pub fn register_user(&self, mut user: Record) -> DirectoryResult<Record> {
        if !user.contains_key("rol") {
            user.set_text("rol", DEFAULT_ROLE);
        }
        self.append(Collection::Users, user)
    }

    /// Remove every user with the given login. Returns how many were removed.
    pub fn delete_user(&self, usuario: &str) -> DirectoryResult<usize> {
        let removed = self
            .store
            .transact(Collection::Users, |users: &mut Vec<Value>| {
                let before = users.len();
                users.retain(|u| {
                    !u.as_object()
                        .is_some_and(|u| u.field_equals("usuario", usuario))
                });
                Ok::<_, DirectoryError>(before - users.len())
            })?;
        debug!(usuario, removed, "user delete");
        Ok(removed)
    }

    // ---- Employees ----

    pub fn list_employees(&self) -> DirectoryResult<Vec<Record>> {
        Ok(self.store.load(Collection::Employees)?)
    }

    pub fn register_employee(&self, employee: Record) -> DirectoryResult<Record> {
        self.append(Collection::Employees, employee)
    }

    // ---- Accounts ----

    /// Insert `profile` at the front of the user list unless a user with
    /// its login already exists. Returns `true` if the profile was inserted.
    pub fn seed_admin(&self, profile: &AdminProfile) -> DirectoryResult<bool> {
        let seeded = self
            .store
            .transact(Collection::Users, |users: &mut Vec<Value>| {
                let taken = users
                    .iter()
                    .filter_map(Value::as_object)
                    .any(|u| u.field_equals("usuario", &profile.usuario));
                if taken {
                    return Ok::<_, DirectoryError>(false);
                }
                users.insert(0, Value::Object(profile.to_record()));
                Ok(true)
            })?;
        if seeded {
            info!(usuario = %profile.usuario, "administrator account seeded");
        }
        Ok(seeded)
    }

    /// The first user, then employee, whose `usuario` or `correo` equals `login`.
    pub fn find_account(&self, login: &str) -> DirectoryResult<Option<Account>> {
        let login = Value::String(login.trim().to_string());
        let owns = |r: &Record| r.get("usuario") == Some(&login) || r.get("correo") == Some(&login);

        if let Some(record) = self.list_users()?.into_iter().find(owns) {
            return Ok(Some(Account {
                kind: AccountKind::User,
                record,
            }));
        }
        Ok(self
            .list_employees()?
            .into_iter()
            .find(owns)
            .map(|record| Account {
                kind: AccountKind::Employee,
                record,
            }))
    }

    fn append(&self, collection: Collection, record: Record) -> DirectoryResult<Record> {
        self.store
            .transact(collection, |records: &mut Vec<Value>| {
                records.push(Value::Object(record.clone()));
                Ok::<_, DirectoryError>(())
            })?;
        debug!(%collection, "account registered");
        Ok(record)
    }
}

impl std::fmt::Debug for Directory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Directory").finish_non_exhaustive()
    }
}
