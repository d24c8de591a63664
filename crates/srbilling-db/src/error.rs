//! sqlx error classification
//!
//! Maps driver errors onto `AppError` once, so the repository and HTTP layers
//! can pass them through unchanged.

use srbilling_core::AppError;

/// Classify a sqlx error, prefixing the message with `context`
pub(crate) fn classify(err: sqlx::Error, context: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::AlreadyExists(format!("{}: {}", context, db_err.message()))
        }
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            AppError::UnknownReference(format!("{}: {}", context, db_err.message()))
        }
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::Decode(_) => AppError::RowScan(format!("{}: {}", context, err)),
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            AppError::Pool(format!("{}: {}", context, err))
        }
        _ => AppError::Database(format!("{}: {}", context, err)),
    }
}

/// Schema statements fail as plain database errors. Catalog conflicts would
/// otherwise classify as `AlreadyExists`.
pub(crate) fn schema(err: sqlx::Error, context: &str) -> AppError {
    AppError::Database(format!("{}: {}", context, err))
}

/// Classify an error raised while beginning, committing or rolling back
pub(crate) fn transaction(err: sqlx::Error, context: &str) -> AppError {
    AppError::Transaction(format!("{}: {}", context, err))
}
