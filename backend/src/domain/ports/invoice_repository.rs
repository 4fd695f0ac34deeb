//! Port abstraction for invoice persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::invoice::{Invoice, InvoiceFields, InvoiceId};

/// Persistence errors raised by invoice repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvoicePersistenceError {
    /// Repository connection could not be established.
    #[error("invoice repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure detail.
        message: String,
    },
    /// Statement failed during execution.
    #[error("invoice repository statement failed: {message}")]
    Query {
        /// Adapter-provided failure detail.
        message: String,
    },
}

impl InvoicePersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Parameterized-statement surface for the invoices table.
///
/// One call maps to one statement; atomicity is whatever the database grants
/// a single statement. Deleting an id that does not exist is not an error.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Insert a new invoice row.
    async fn insert(&self, invoice: &Invoice) -> Result<(), InvoicePersistenceError>;

    /// Overwrite the mutable fields of an existing invoice row.
    async fn update(
        &self,
        id: &InvoiceId,
        fields: &InvoiceFields,
    ) -> Result<(), InvoicePersistenceError>;

    /// Delete an invoice row by id.
    async fn delete(&self, id: &InvoiceId) -> Result<(), InvoicePersistenceError>;

    /// Fetch every invoice for the listing view, newest issue date first.
    async fn list(&self) -> Result<Vec<Invoice>, InvoicePersistenceError>;
}
