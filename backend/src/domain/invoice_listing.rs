//! Read side of the invoice listing, served through the view cache.
//!
//! The listing body is rendered once, stored under the listing path, and
//! served from cache until a mutation invalidates it. Cache trouble is
//! logged and the listing falls back to a fresh read.

use std::sync::Arc;

use tracing::warn;

use crate::domain::error::Error;
use crate::domain::invoice_actions::INVOICES_DASHBOARD_PATH;
use crate::domain::ports::{InvoicePersistenceError, InvoiceRepository, ViewCache};

/// Cached read model for the invoice listing view.
pub struct InvoiceListing {
    invoices: Arc<dyn InvoiceRepository>,
    view_cache: Arc<dyn ViewCache>,
}

impl InvoiceListing {
    /// Build the listing from its collaborator ports.
    pub fn new(invoices: Arc<dyn InvoiceRepository>, view_cache: Arc<dyn ViewCache>) -> Self {
        Self {
            invoices,
            view_cache,
        }
    }

    /// Render the listing as a JSON body, reading through the cache.
    pub async fn render(&self) -> Result<String, Error> {
        match self.view_cache.get(INVOICES_DASHBOARD_PATH).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(err) => warn!(error = %err, "invoice listing cache read failed"),
        }

        let invoices = self
            .invoices
            .list()
            .await
            .map_err(map_persistence_error)?;
        let body = serde_json::to_string(&invoices)
            .map_err(|err| Error::internal(format!("invoice listing serialisation failed: {err}")))?;

        if let Err(err) = self.view_cache.put(INVOICES_DASHBOARD_PATH, &body).await {
            warn!(error = %err, "invoice listing cache write failed");
        }
        Ok(body)
    }
}

fn map_persistence_error(error: InvoicePersistenceError) -> Error {
    match error {
        InvoicePersistenceError::Connection { message } => Error::service_unavailable(message),
        InvoicePersistenceError::Query { message } => Error::internal(message),
    }
}
