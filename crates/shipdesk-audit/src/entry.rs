//! Audit entry types.
//!
//! An [`AuditEntry`] is the structured view of one audit line. Only the
//! formatted string is persisted; [`AuditEntry::parse`] recovers the
//! structure for display.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The package mutation an entry records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Registered,
    Edited,
    Deleted,
}

impl AuditAction {
    pub const ALL: [AuditAction; 3] = [Self::Registered, Self::Edited, Self::Deleted];

    /// The verb phrase written into the log.
    pub fn phrase(&self) -> &'static str {
        match self {
            Self::Registered => "Registró paquete",
            Self::Edited => "Editó paquete",
            Self::Deleted => "Eliminó paquete",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.phrase())
    }
}

/// A single audit line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// `YYYY-MM-DD HH:MM:SS` at which the mutation happened.
    pub timestamp: String,
    pub action: AuditAction,
    /// Code of the package the mutation targeted.
    pub code: String,
}

impl AuditEntry {
    pub fn new(timestamp: impl Into<String>, action: AuditAction, code: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            action,
            code: code.into(),
        }
    }

    /// Parse a persisted line. Returns `None` for lines not written by
    /// [`AuditEntry`]'s `Display`.
    pub fn parse(line: &str) -> Option<Self> {
        let rest = line.strip_prefix('[')?;
        let (timestamp, rest) = rest.split_once("] ")?;
        AuditAction::ALL.into_iter().find_map(|action| {
            let code = rest.strip_prefix(action.phrase())?.strip_prefix(' ')?;
            Some(Self::new(timestamp, action, code))
        })
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} {}", self.timestamp, self.action, self.code)
    }
}
