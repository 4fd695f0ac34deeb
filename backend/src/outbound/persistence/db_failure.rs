//! Shared classification of pool and Diesel failures.
//!
//! Repositories translate a [`DbFailure`] into their own port error type so
//! the domain can distinguish connection trouble from statement trouble
//! without seeing Diesel types. Raw database detail is logged here and kept
//! out of the messages handed to the domain.

use tracing::debug;

use super::pool::PoolError;

/// Coarse failure category shared by every repository.
#[derive(Debug, Clone)]
pub(crate) enum DbFailure {
    /// A connection could not be obtained or was lost.
    Connection(String),
    /// A statement failed during execution.
    Query(String),
}

pub(crate) fn classify_pool_error(error: PoolError) -> DbFailure {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            DbFailure::Connection(message)
        }
    }
}

pub(crate) fn classify_diesel_error(error: diesel::result::Error) -> DbFailure {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DbFailure::Connection("database connection error".to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DbFailure::Query("duplicate key value violates a unique constraint".to_owned())
        }
        DieselError::NotFound => DbFailure::Query("record not found".to_owned()),
        _ => DbFailure::Query("database error".to_owned()),
    }
}
