//! Domain primitives, aggregates, and use-cases.
//!
//! Purpose: define strongly typed entities for the invoice and user forms,
//! the mutation pipeline built on top of them, and the port traits the
//! adapters implement. Types are immutable; invariants and serialisation
//! contracts are documented on each type.

pub mod auth;
pub mod authenticate;
pub mod error;
pub mod forms;
pub mod invoice;
pub mod invoice_actions;
pub mod invoice_listing;
pub mod password;
pub mod ports;
pub mod signup;
pub mod user;

pub use self::auth::{DASHBOARD_PATH, LoginCredentials, LoginValidationError};
pub use self::authenticate::{AuthenticateAction, LoginOutcome};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::forms::{FieldErrors, FormFeedback};
pub use self::invoice::{Invoice, InvoiceFormInput, InvoiceId, InvoiceStatus};
pub use self::invoice_actions::{ActionOutcome, INVOICES_DASHBOARD_PATH, InvoiceActions};
pub use self::invoice_listing::InvoiceListing;
pub use self::signup::{SignupOutcome, SignupService};
pub use self::user::{SignupFormInput, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use invoices_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
