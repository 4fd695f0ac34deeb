//! Port abstractions decoupling the domain from infrastructure.
//!
//! Outbound adapters implement these traits; domain services and inbound
//! handlers depend only on the trait objects.

mod auth_service;
mod invoice_repository;
mod user_repository;
mod view_cache;

pub use auth_service::{AuthError, AuthService, SignInOutcome};
pub use invoice_repository::{InvoicePersistenceError, InvoiceRepository};
pub use user_repository::{UserPersistenceError, UserRepository};
pub use view_cache::{ViewCache, ViewCacheError};
