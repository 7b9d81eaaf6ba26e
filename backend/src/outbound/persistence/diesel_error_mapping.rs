//! Shared Diesel error mapping for the repository adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(super) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Constructors used to translate Diesel failures into a port error.
pub(super) struct DieselErrorMapping<Q, C, K> {
    pub query: Q,
    pub connection: C,
    pub conflict: K,
}

/// Map Diesel errors onto query, connection and conflict constructors.
///
/// Unique and foreign-key violations become conflicts naming the constraint;
/// other database failures keep a stable message so driver text never leaks.
pub(super) fn map_diesel_error<E, Q, C, K>(
    error: DieselError,
    mapping: DieselErrorMapping<Q, C, K>,
) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
    K: FnOnce(String) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => (mapping.query)("record not found"),
        DieselError::QueryBuilderError(_) => (mapping.query)("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            (mapping.connection)("database connection error")
        }
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::ForeignKeyViolation,
            info,
        ) => (mapping.conflict)(match info.constraint_name() {
            Some(constraint) => format!("constraint {constraint} violated"),
            None => "constraint violated".to_owned(),
        }),
        _ => (mapping.query)("database error"),
    }
}
