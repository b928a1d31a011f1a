use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A named, independently persisted ordered sequence of records.
///
/// Each collection is backed by exactly one file under the data directory.
/// The file names are the ones the back office has always written, so an
/// existing data directory is picked up as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Users,
    Employees,
    Packages,
    Audit,
    Transactions,
    Documents,
    /// Last issued number per document series.
    Sequences,
}

impl Collection {
    /// Number of collections.
    pub const COUNT: usize = 7;

    /// Every collection, in a fixed order.
    pub const ALL: [Collection; Self::COUNT] = [
        Collection::Users,
        Collection::Employees,
        Collection::Packages,
        Collection::Audit,
        Collection::Transactions,
        Collection::Documents,
        Collection::Sequences,
    ];

    /// Stable short name, used in logs and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Employees => "employees",
            Self::Packages => "packages",
            Self::Audit => "audit",
            Self::Transactions => "transactions",
            Self::Documents => "documents",
            Self::Sequences => "sequences",
        }
    }

    /// Backing file name inside the data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Users => "usuarios.txt",
            Self::Employees => "empleados.txt",
            Self::Packages => "paquetes.txt",
            Self::Audit => "historial.txt",
            Self::Transactions => "transacciones.txt",
            Self::Documents => "facturas.txt",
            Self::Sequences => "secuencias.txt",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| TypeError::UnknownCollection(s.to_string()))
    }
}
