//! Invoice mutation actions: create, update, delete.
//!
//! Each action composes validation, coercion, persistence, listing-cache
//! invalidation, and navigation. Failures never escape as errors: the
//! outcome value carries the feedback the form needs, and persistence detail
//! is reduced to a fixed generic message. There are no retries and no
//! compensation beyond single-statement atomicity.

use std::sync::Arc;

use mockable::Clock;
use tracing::warn;

use crate::domain::forms::FormFeedback;
use crate::domain::invoice::{Invoice, InvoiceFields, InvoiceFormInput, InvoiceId};
use crate::domain::ports::{InvoiceRepository, ViewCache};

/// Path of the invoice listing view, both the cache key and the redirect
/// target after a successful mutation.
pub const INVOICES_DASHBOARD_PATH: &str = "/dashboard/invoices";

const MSG_MISSING_FIELDS_CREATE: &str = "Missing Fields. Failed to Create Invoice.";
const MSG_MISSING_FIELDS_UPDATE: &str = "Missing Fields. Failed to Update Invoice.";
const MSG_DB_ERROR_CREATE: &str = "Database Error: Failed to Create Invoice.";
const MSG_DB_ERROR_UPDATE: &str = "Database Error: Failed to Update Invoice.";
// No trailing period, unlike the create/update messages.
const MSG_DB_ERROR_DELETE: &str = "Database Error: Failed to Delete Invoice";
const MSG_DELETED: &str = "Deleted Invoice";

/// Terminal outcome of a mutation action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// The mutation succeeded; the client should navigate to `location`.
    Redirect {
        /// Navigation target.
        location: String,
    },
    /// Validation failed; nothing was persisted.
    Rejected(FormFeedback),
    /// The persistence statement failed; detail is withheld.
    Failed {
        /// Fixed generic message for the form.
        message: String,
    },
    /// The mutation succeeded without navigation (delete path).
    Completed {
        /// Success message for the form.
        message: String,
    },
}

/// Create/update/delete use-cases over the invoices table.
pub struct InvoiceActions {
    invoices: Arc<dyn InvoiceRepository>,
    view_cache: Arc<dyn ViewCache>,
    clock: Arc<dyn Clock>,
}

impl InvoiceActions {
    /// Build the actions from their collaborator ports.
    pub fn new(
        invoices: Arc<dyn InvoiceRepository>,
        view_cache: Arc<dyn ViewCache>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            invoices,
            view_cache,
            clock,
        }
    }

    /// Validate and persist a new invoice.
    ///
    /// The issue date is generated server-side from the injected clock; the
    /// identifier is a fresh UUID per call, so resubmitting identical form
    /// data creates a distinct record.
    pub async fn create(&self, input: &InvoiceFormInput) -> ActionOutcome {
        let fields = match InvoiceFields::parse(input) {
            Ok(fields) => fields,
            Err(errors) => {
                return ActionOutcome::Rejected(FormFeedback::invalid(
                    errors,
                    MSG_MISSING_FIELDS_CREATE,
                ));
            }
        };

        let invoice = Invoice::new(
            InvoiceId::generate(),
            fields.customer_id,
            fields.amount,
            fields.status,
            self.clock.utc().date_naive(),
        );

        if let Err(err) = self.invoices.insert(&invoice).await {
            warn!(error = %err, "invoice insert failed");
            return ActionOutcome::Failed {
                message: MSG_DB_ERROR_CREATE.to_owned(),
            };
        }

        self.invalidate_listing().await;
        ActionOutcome::Redirect {
            location: INVOICES_DASHBOARD_PATH.to_owned(),
        }
    }

    /// Validate and apply field changes to an existing invoice.
    pub async fn update(&self, id: &InvoiceId, input: &InvoiceFormInput) -> ActionOutcome {
        let fields = match InvoiceFields::parse(input) {
            Ok(fields) => fields,
            Err(errors) => {
                return ActionOutcome::Rejected(FormFeedback::invalid(
                    errors,
                    MSG_MISSING_FIELDS_UPDATE,
                ));
            }
        };

        if let Err(err) = self.invoices.update(id, &fields).await {
            warn!(error = %err, invoice_id = %id, "invoice update failed");
            return ActionOutcome::Failed {
                message: MSG_DB_ERROR_UPDATE.to_owned(),
            };
        }

        self.invalidate_listing().await;
        ActionOutcome::Redirect {
            location: INVOICES_DASHBOARD_PATH.to_owned(),
        }
    }

    /// Delete an invoice by id.
    ///
    /// There is no validation step; an id with no matching row deletes zero
    /// rows and still reports success.
    pub async fn delete(&self, id: &InvoiceId) -> ActionOutcome {
        if let Err(err) = self.invoices.delete(id).await {
            warn!(error = %err, invoice_id = %id, "invoice delete failed");
            return ActionOutcome::Failed {
                message: MSG_DB_ERROR_DELETE.to_owned(),
            };
        }

        self.invalidate_listing().await;
        ActionOutcome::Completed {
            message: MSG_DELETED.to_owned(),
        }
    }

    // Cache trouble must not fail a mutation that already persisted.
    async fn invalidate_listing(&self) {
        if let Err(err) = self.view_cache.invalidate(INVOICES_DASHBOARD_PATH).await {
            warn!(error = %err, "invoice listing cache invalidation failed");
        }
    }
}
