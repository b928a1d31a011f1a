//! Multi-predicate document search.

use serde::{Deserialize, Serialize};
use shipdesk_types::{Record, RecordExt};

/// Search criteria. Every field is optional; an absent or empty field does
/// not filter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentFilter {
    /// Case-insensitive substring of `cliente` or `nombre_cliente`.
    pub cliente: Option<String>,
    /// Inclusive lower bound on `fecha_emision`, compared as text.
    pub fecha_inicio: Option<String>,
    /// Inclusive upper bound on `fecha_emision`, compared as text.
    pub fecha_fin: Option<String>,
    pub estado: Option<String>,
    pub tipo_documento: Option<String>,
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl DocumentFilter {
    pub fn with_cliente(mut self, cliente: impl Into<String>) -> Self {
        self.cliente = Some(cliente.into());
        self
    }

    pub fn with_fecha_inicio(mut self, fecha: impl Into<String>) -> Self {
        self.fecha_inicio = Some(fecha.into());
        self
    }

    pub fn with_fecha_fin(mut self, fecha: impl Into<String>) -> Self {
        self.fecha_fin = Some(fecha.into());
        self
    }

    pub fn with_estado(mut self, estado: impl Into<String>) -> Self {
        self.estado = Some(estado.into());
        self
    }

    pub fn with_tipo_documento(mut self, tipo: impl Into<String>) -> Self {
        self.tipo_documento = Some(tipo.into());
        self
    }

    /// Returns `true` if no criterion is active.
    pub fn is_empty(&self) -> bool {
        [
            &self.cliente,
            &self.fecha_inicio,
            &self.fecha_fin,
            &self.estado,
            &self.tipo_documento,
        ]
        .into_iter()
        .all(|v| active(v).is_none())
    }

    /// Narrow `documents` by each active criterion in turn: client, date
    /// lower bound, date upper bound, status, document type. Order is kept.
    pub fn apply(&self, documents: Vec<Record>) -> Vec<Record> {
        let mut docs = documents;

        if let Some(cliente) = active(&self.cliente) {
            let needle = cliente.to_lowercase();
            docs.retain(|d| {
                d.text("cliente").to_lowercase().contains(&needle)
                    || d.text("nombre_cliente").to_lowercase().contains(&needle)
            });
        }
        if let Some(desde) = active(&self.fecha_inicio) {
            docs.retain(|d| d.text("fecha_emision") >= desde);
        }
        if let Some(hasta) = active(&self.fecha_fin) {
            docs.retain(|d| d.text("fecha_emision") <= hasta);
        }
        if let Some(estado) = active(&self.estado) {
            docs.retain(|d| d.text("estado") == estado);
        }
        if let Some(tipo) = active(&self.tipo_documento) {
            docs.retain(|d| d.text("tipo_documento") == tipo);
        }
        docs
    }
}
