//! OpenAPI documentation surface used by Swagger UI and tooling.

use utoipa::OpenApi;

use crate::domain;
use crate::inbound::http;

/// Aggregated OpenAPI description of the HTTP surface.
#[derive(OpenApi)]
#[openapi(
    paths(
        http::users::sign_up,
        http::users::login,
        http::invoices::create_invoice,
        http::invoices::list_invoices,
        http::invoices::update_invoice,
        http::invoices::delete_invoice,
        http::health::ready,
        http::health::live,
    ),
    components(schemas(
        domain::Error,
        domain::ErrorCode,
        domain::FormFeedback,
        domain::InvoiceFormInput,
        domain::InvoiceStatus,
        domain::SignupFormInput,
        http::users::LoginFormData,
    )),
    tags(
        (name = "users", description = "Sign-up and sign-in"),
        (name = "invoices", description = "Invoice form actions"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;
