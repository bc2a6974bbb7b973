//! Shared helpers for Diesel repository implementations.

use tracing::debug;

/// Extract a readable message from a Diesel error and emit debug context.
pub(super) fn diesel_error_message(error: &diesel::result::Error, operation: &str) -> String {
    let message = error.to_string();
    debug!(%message, %operation, "diesel operation failed");
    message
}

/// Whether the error is a foreign key violation, regardless of constraint.
pub(super) fn is_foreign_key_violation(error: &diesel::result::Error) -> bool {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)
    )
}
