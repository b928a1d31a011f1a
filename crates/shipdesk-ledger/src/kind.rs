use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::numbering::DocumentSeries;

/// The two mutually exclusive billing document types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Receipt, issued to a person identified by DNI.
    Boleta,
    /// Invoice, issued to a company identified by RUC.
    Factura,
}

impl DocumentKind {
    /// Value of the `tipo_documento` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boleta => "boleta",
            Self::Factura => "factura",
        }
    }

    /// Series the derived number is drawn from.
    pub fn series(&self) -> DocumentSeries {
        match self {
            Self::Boleta => DocumentSeries::Receipt,
            Self::Factura => DocumentSeries::Invoice,
        }
    }

    /// Field receiving the derived number.
    pub fn number_field(&self) -> &'static str {
        match self {
            Self::Boleta => "numero_boleta",
            Self::Factura => "numero_factura",
        }
    }

    /// Customer fields copied from the caller on conversion.
    pub fn customer_fields(&self) -> [&'static str; 2] {
        match self {
            Self::Boleta => ["dni_cliente", "nombre_cliente"],
            Self::Factura => ["ruc_cliente", "razon_social"],
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boleta" => Ok(Self::Boleta),
            "factura" => Ok(Self::Factura),
            other => Err(LedgerError::UnknownDocumentKind(other.to_string())),
        }
    }
}
