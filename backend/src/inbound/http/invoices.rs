//! Invoice form handlers.
//!
//! ```text
//! POST /api/v1/invoices              customerId=c1&amount=10.50&status=pending
//! POST /api/v1/invoices/{id}         customerId=c1&amount=12&status=paid
//! POST /api/v1/invoices/{id}/delete
//! GET  /api/v1/invoices
//! ```
//!
//! Mutations answer with a `303 See Other` to the listing on success, a
//! `422` carrying the field-keyed error report on validation failure, and a
//! `500` carrying the fixed generic message on persistence failure. Delete
//! answers `200` with a message instead of navigating.

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use uuid::Uuid;

use crate::domain::{ActionOutcome, FormFeedback, InvoiceFormInput, InvoiceId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

fn respond(outcome: ActionOutcome) -> HttpResponse {
    match outcome {
        ActionOutcome::Redirect { location } => HttpResponse::SeeOther()
            .insert_header((header::LOCATION, location))
            .finish(),
        ActionOutcome::Rejected(feedback) => HttpResponse::UnprocessableEntity().json(feedback),
        ActionOutcome::Failed { message } => {
            HttpResponse::InternalServerError().json(FormFeedback::from_message(message))
        }
        ActionOutcome::Completed { message } => {
            HttpResponse::Ok().json(FormFeedback::from_message(message))
        }
    }
}

/// Create an invoice from a form submission.
#[utoipa::path(
    post,
    path = "/api/v1/invoices",
    request_body(
        content = InvoiceFormInput,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 303, description = "Invoice created; redirect to the listing"),
        (status = 401, description = "Login required", body = crate::domain::Error),
        (status = 422, description = "Validation failed", body = FormFeedback),
        (status = 500, description = "Persistence failed", body = FormFeedback)
    ),
    tags = ["invoices"],
    operation_id = "createInvoice"
)]
#[post("/invoices")]
pub async fn create_invoice(
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<InvoiceFormInput>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    Ok(respond(state.invoice_actions.create(&form).await))
}

/// Update an invoice's fields in place.
#[utoipa::path(
    post,
    path = "/api/v1/invoices/{id}",
    params(("id" = Uuid, Path, description = "Invoice identifier")),
    request_body(
        content = InvoiceFormInput,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 303, description = "Invoice updated; redirect to the listing"),
        (status = 401, description = "Login required", body = crate::domain::Error),
        (status = 422, description = "Validation failed", body = FormFeedback),
        (status = 500, description = "Persistence failed", body = FormFeedback)
    ),
    tags = ["invoices"],
    operation_id = "updateInvoice"
)]
#[post("/invoices/{id}")]
pub async fn update_invoice(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    form: web::Form<InvoiceFormInput>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let id = InvoiceId::from_uuid(path.into_inner());
    Ok(respond(state.invoice_actions.update(&id, &form).await))
}

/// Delete an invoice by id.
///
/// No validation step: an id with no matching row still reports success.
#[utoipa::path(
    post,
    path = "/api/v1/invoices/{id}/delete",
    params(("id" = Uuid, Path, description = "Invoice identifier")),
    responses(
        (status = 200, description = "Invoice deleted", body = FormFeedback),
        (status = 401, description = "Login required", body = crate::domain::Error),
        (status = 500, description = "Persistence failed", body = FormFeedback)
    ),
    tags = ["invoices"],
    operation_id = "deleteInvoice"
)]
#[post("/invoices/{id}/delete")]
pub async fn delete_invoice(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let id = InvoiceId::from_uuid(path.into_inner());
    Ok(respond(state.invoice_actions.delete(&id).await))
}

/// Invoice listing backing the dashboard view, served through the cache.
#[utoipa::path(
    get,
    path = "/api/v1/invoices",
    responses(
        (status = 200, description = "Invoice listing", body = String, content_type = "application/json"),
        (status = 401, description = "Login required", body = crate::domain::Error),
        (status = 503, description = "Persistence unavailable", body = crate::domain::Error)
    ),
    tags = ["invoices"],
    operation_id = "listInvoices"
)]
#[get("/invoices")]
pub async fn list_invoices(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let body = state.invoice_listing.render().await?;
    Ok(HttpResponse::Ok()
        .content_type(header::ContentType::json())
        .body(body))
}
