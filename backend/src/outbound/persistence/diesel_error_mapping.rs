//! Shared Diesel error mapping and call deadlines for repositories.
//!
//! Every repository error enum exposes the same connection, query and
//! timeout constructors; [`StoreErrorKinds`] lets the helpers here build
//! them generically. Unique-constraint violations are returned to the
//! caller untouched so each repository can name its own duplicates.

use std::future::Future;
use std::time::Duration;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use crate::domain::ports::{
    ListingRepositoryError, PropertyRequestRepositoryError, UserRepositoryError,
};

use super::pool::PoolError;

/// Constructors shared by all repository error enums.
pub(crate) trait StoreErrorKinds: Sized {
    fn connection(message: String) -> Self;
    fn query(message: String) -> Self;
    fn timeout(operation: &'static str) -> Self;
}

macro_rules! impl_store_error_kinds {
    ($($error:ty),* $(,)?) => {
        $(
            impl StoreErrorKinds for $error {
                fn connection(message: String) -> Self {
                    <$error>::connection(message)
                }

                fn query(message: String) -> Self {
                    <$error>::query(message)
                }

                fn timeout(operation: &'static str) -> Self {
                    <$error>::timeout(operation)
                }
            }
        )*
    };
}

impl_store_error_kinds!(
    UserRepositoryError,
    ListingRepositoryError,
    PropertyRequestRepositoryError,
);

/// Map pool checkout failures into a repository connection error.
pub(crate) fn map_pool_error<E: StoreErrorKinds>(error: PoolError) -> E {
    E::connection(error.message().to_owned())
}

/// Map common Diesel error variants into query/connection errors.
pub(crate) fn map_diesel_error<E: StoreErrorKinds>(error: DieselError) -> E {
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
        DieselError::NotFound => E::query("record not found".into()),
        DieselError::QueryBuilderError(_) => E::query("database query error".into()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            E::connection("database connection error".into())
        }
        _ => E::query("database error".into()),
    }
}

/// Name of the unique constraint a Diesel error violated, if any.
pub(crate) fn violated_unique_constraint(error: &DieselError) -> Option<&str> {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            info.constraint_name()
        }
        _ => None,
    }
}

/// Run one store call, failing with a timeout error once `deadline` passes.
pub(crate) async fn with_deadline<T, E, Fut>(
    deadline: Duration,
    operation: &'static str,
    call: Fut,
) -> Result<T, E>
where
    E: StoreErrorKinds,
    Fut: Future<Output = Result<T, E>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => {
            let deadline_ms = u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX);
            warn!(operation, deadline_ms, "store call exceeded deadline");
            Err(E::timeout(operation))
        }
    }
}
