//! Translation of driven-port failures into domain errors.
//!
//! Connection failures become `service_unavailable`, deadline overruns become
//! `timeout`, and query failures become redacted `internal` errors. Constraint
//! violations are left to the calling service, which knows the wording.

use tracing::{error, warn};

use super::Error;
use super::ports::{
    ListingRepositoryError, PasswordHasherError, PropertyRequestRepositoryError, TokenError,
    UserRepositoryError,
};

pub(crate) fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => unavailable("user", &message),
        UserRepositoryError::Query { message } => query_failed("user", &message),
        UserRepositoryError::Timeout { operation } => timed_out("user", &operation),
        UserRepositoryError::DuplicateEmail { .. } => {
            Error::conflict("user with this email already exists")
        }
    }
}

pub(crate) fn map_listing_repository_error(error: ListingRepositoryError) -> Error {
    match error {
        ListingRepositoryError::Connection { message } => unavailable("listing", &message),
        ListingRepositoryError::Query { message } => query_failed("listing", &message),
        ListingRepositoryError::Timeout { operation } => timed_out("listing", &operation),
    }
}

pub(crate) fn map_property_request_repository_error(
    error: PropertyRequestRepositoryError,
) -> Error {
    match error {
        PropertyRequestRepositoryError::Connection { message } => {
            unavailable("property request", &message)
        }
        PropertyRequestRepositoryError::Query { message } => {
            query_failed("property request", &message)
        }
        PropertyRequestRepositoryError::Timeout { operation } => {
            timed_out("property request", &operation)
        }
        PropertyRequestRepositoryError::DuplicatePending => {
            Error::conflict("you already have a pending request for this property")
        }
    }
}

pub(crate) fn map_hasher_error(error: &PasswordHasherError) -> Error {
    error!(%error, "password hashing failed");
    Error::internal(error.to_string())
}

pub(crate) fn map_token_issue_error(error: &TokenError) -> Error {
    error!(%error, "session token could not be issued");
    Error::internal(error.to_string())
}

fn unavailable(store: &str, message: &str) -> Error {
    warn!(store, message, "store connection failed");
    Error::service_unavailable(format!("{store} store unavailable"))
}

fn query_failed(store: &str, message: &str) -> Error {
    error!(store, message, "store query failed");
    Error::internal(format!("{store} store error: {message}"))
}

fn timed_out(store: &str, operation: &str) -> Error {
    warn!(store, operation, "store call timed out");
    Error::timeout(format!("{store} store timed out"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(UserRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(UserRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(UserRepositoryError::timeout("find_by_id"), ErrorCode::Timeout)]
    #[case(UserRepositoryError::duplicate_email("a@b.c"), ErrorCode::Conflict)]
    fn user_errors_map_to_codes(#[case] error: UserRepositoryError, #[case] code: ErrorCode) {
        assert_eq!(map_user_repository_error(error).code(), code);
    }

    #[rstest]
    #[case(ListingRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(ListingRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(ListingRepositoryError::timeout("list"), ErrorCode::Timeout)]
    fn listing_errors_map_to_codes(#[case] error: ListingRepositoryError, #[case] code: ErrorCode) {
        assert_eq!(map_listing_repository_error(error).code(), code);
    }

    #[rstest]
    #[case(PropertyRequestRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(PropertyRequestRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(PropertyRequestRepositoryError::timeout("insert"), ErrorCode::Timeout)]
    #[case(PropertyRequestRepositoryError::duplicate_pending(), ErrorCode::Conflict)]
    fn request_errors_map_to_codes(
        #[case] error: PropertyRequestRepositoryError,
        #[case] code: ErrorCode,
    ) {
        assert_eq!(map_property_request_repository_error(error).code(), code);
    }

    #[rstest]
    fn duplicate_pending_uses_client_wording() {
        let error =
            map_property_request_repository_error(PropertyRequestRepositoryError::DuplicatePending);
        assert_eq!(
            error.message(),
            "you already have a pending request for this property"
        );
    }
}
