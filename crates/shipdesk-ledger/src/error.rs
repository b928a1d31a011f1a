use shipdesk_store::StoreError;

/// Errors produced by ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// No document has the identifier as its `numero` or `codigo`.
    #[error("document not found: {id}")]
    NotFound { id: String },

    #[error("unknown document type {0:?}; expected \"boleta\" or \"factura\"")]
    UnknownDocumentKind(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl LedgerError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
