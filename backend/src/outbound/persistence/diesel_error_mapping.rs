//! Shared classification of Diesel failures.
//!
//! Repositories turn a [`StoreFailure`] into their own port error; constraint
//! violations are kept apart so uniqueness races surface as validation
//! errors rather than generic query failures.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// What went wrong, independent of the table involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    /// The connection dropped.
    Connection(String),
    /// A unique index rejected the row.
    UniqueViolation,
    /// A foreign key rejected the row.
    ForeignKeyViolation,
    /// Anything else.
    Query(String),
}

pub(crate) fn classify(error: DieselError) -> StoreFailure {
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
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            StoreFailure::UniqueViolation
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            StoreFailure::ForeignKeyViolation
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreFailure::Connection("database connection error".to_owned())
        }
        DieselError::NotFound => StoreFailure::Query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => StoreFailure::Query("database query error".to_owned()),
        _ => StoreFailure::Query("database error".to_owned()),
    }
}
