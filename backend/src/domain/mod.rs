//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, and the services that implement the marketplace
//! workflows on top of the ports in [`ports`]. Keep types immutable and
//! document invariants and serialisation contracts (serde) in each type's
//! Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User (alias to `user::User`): registered account with its role.
//! - Listing / PropertyRequest: catalogue entries and viewing requests.
//! - AccountService, PropertyRequestService, ListingService: driving-port
//!   implementations.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod listing;
pub mod listing_service;
pub mod ports;
pub mod property_request;
pub mod property_request_service;
mod repository_errors;
pub mod session_token;
#[cfg(test)]
pub(crate) mod test_fixtures;
mod timestamps;
pub mod trace_id;
pub mod user;

pub use self::account_service::{AccountService, INVALID_CREDENTIALS};
pub use self::auth::{
    AuthSession, CredentialsValidationError, LoginCredentials, PASSWORD_MIN_LEN,
    RegistrationDetails, RegistrationInput,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::listing::{
    Listing, ListingAgent, ListingDetails, ListingId, ListingPatch, ListingValidationError,
    MISSING_LISTING_NAME,
};
pub use self::listing_service::ListingService;
pub use self::property_request::{
    EnrichedPropertyRequest, PropertyRequest, PropertyRequestId, PropertyRequestValidationError,
    REQUEST_MESSAGE_MAX, RequestStatus,
};
pub use self::property_request_service::PropertyRequestService;
pub use self::session_token::{SessionToken, TOKEN_SECRET_MIN_LEN, TokenSecret};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, PERSON_NAME_MAX, PasswordHash, PersonName, PhoneNumber, Role, User, UserId,
    UserParts, UserProfile, UserSummary, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
