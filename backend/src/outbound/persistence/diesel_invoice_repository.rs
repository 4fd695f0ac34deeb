//! PostgreSQL-backed `InvoiceRepository` implementation using Diesel ORM.
//!
//! A thin adapter: each port method issues one parameterized statement and
//! translates between row structs and domain types. No business logic lives
//! here.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::invoice::{
    AmountCents, CustomerId, Invoice, InvoiceFields, InvoiceId, InvoiceStatus,
};
use crate::domain::ports::{InvoicePersistenceError, InvoiceRepository};

use super::db_failure::{DbFailure, classify_diesel_error, classify_pool_error};
use super::models::{InvoiceChangeset, InvoiceRow, NewInvoiceRow};
use super::pool::DbPool;
use super::schema::invoices;

/// Diesel-backed implementation of the `InvoiceRepository` port.
#[derive(Clone)]
pub struct DieselInvoiceRepository {
    pool: DbPool,
}

impl DieselInvoiceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: DbFailure) -> InvoicePersistenceError {
    match failure {
        DbFailure::Connection(message) => InvoicePersistenceError::connection(message),
        DbFailure::Query(message) => InvoicePersistenceError::query(message),
    }
}

fn row_to_invoice(row: InvoiceRow) -> Result<Invoice, InvoicePersistenceError> {
    let customer_id = CustomerId::new(&row.customer_id)
        .map_err(|err| InvoicePersistenceError::query(format!("stored invoice invalid: {err}")))?;
    let amount = AmountCents::from_cents(row.amount)
        .map_err(|err| InvoicePersistenceError::query(format!("stored invoice invalid: {err}")))?;
    let status = InvoiceStatus::parse(&row.status)
        .map_err(|err| InvoicePersistenceError::query(format!("stored invoice invalid: {err}")))?;
    Ok(Invoice::new(
        InvoiceId::from_uuid(row.id),
        customer_id,
        amount,
        status,
        row.date,
    ))
}

#[async_trait]
impl InvoiceRepository for DieselInvoiceRepository {
    async fn insert(&self, invoice: &Invoice) -> Result<(), InvoicePersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_failure(classify_pool_error(err)))?;

        let row = NewInvoiceRow {
            id: *invoice.id().as_uuid(),
            customer_id: invoice.customer_id().as_ref(),
            amount: invoice.amount().cents(),
            status: invoice.status().as_str(),
            date: invoice.date(),
        };

        diesel::insert_into(invoices::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_failure(classify_diesel_error(err)))?;
        Ok(())
    }

    async fn update(
        &self,
        id: &InvoiceId,
        fields: &InvoiceFields,
    ) -> Result<(), InvoicePersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_failure(classify_pool_error(err)))?;

        let changes = InvoiceChangeset {
            customer_id: fields.customer_id.as_ref(),
            amount: fields.amount.cents(),
            status: fields.status.as_str(),
        };

        // Zero affected rows is not an error: the surface treats a missing
        // id the same as a no-op update.
        diesel::update(invoices::table.filter(invoices::id.eq(id.as_uuid())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| map_failure(classify_diesel_error(err)))?;
        Ok(())
    }

    async fn delete(&self, id: &InvoiceId) -> Result<(), InvoicePersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_failure(classify_pool_error(err)))?;

        diesel::delete(invoices::table.filter(invoices::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(|err| map_failure(classify_diesel_error(err)))?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Invoice>, InvoicePersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_failure(classify_pool_error(err)))?;

        let rows = invoices::table
            .order(invoices::date.desc())
            .select(InvoiceRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_failure(classify_diesel_error(err)))?;

        rows.into_iter().map(row_to_invoice).collect()
    }
}
