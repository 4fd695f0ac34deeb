//! Shared HTTP adapter state.
//!
//! Handlers receive the domain use-cases via `actix_web::web::Data`, built
//! once from a bundle of port implementations. Handlers never see concrete
//! adapters, which keeps them testable with in-memory doubles.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{AuthService, InvoiceRepository, UserRepository, ViewCache};
use crate::domain::{AuthenticateAction, InvoiceActions, InvoiceListing, SignupService};

/// Parameter object bundling the port implementations the handlers need.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Invoice table adapter.
    pub invoices: Arc<dyn InvoiceRepository>,
    /// User table adapter.
    pub users: Arc<dyn UserRepository>,
    /// Credential sign-in adapter.
    pub auth: Arc<dyn AuthService>,
    /// Rendered-view cache adapter.
    pub view_cache: Arc<dyn ViewCache>,
    /// Time source for server-generated dates.
    pub clock: Arc<dyn Clock>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Invoice create/update/delete use-cases.
    pub invoice_actions: Arc<InvoiceActions>,
    /// Cached invoice listing read model.
    pub invoice_listing: Arc<InvoiceListing>,
    /// Sign-up use-case.
    pub signup: Arc<SignupService>,
    /// Sign-in use-case.
    pub login: Arc<AuthenticateAction>,
}

impl HttpState {
    /// Assemble the use-cases from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            invoices,
            users,
            auth,
            view_cache,
            clock,
        } = ports;
        Self {
            invoice_actions: Arc::new(InvoiceActions::new(
                invoices.clone(),
                view_cache.clone(),
                clock,
            )),
            invoice_listing: Arc::new(InvoiceListing::new(invoices, view_cache)),
            signup: Arc::new(SignupService::new(users, auth.clone())),
            login: Arc::new(AuthenticateAction::new(auth)),
        }
    }
}
