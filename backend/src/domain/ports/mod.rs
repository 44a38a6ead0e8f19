//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`], [`TokenService`]) are
//! implemented by outbound adapters. Driving ports are implemented by domain
//! services and called from inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod identity_resolver;
mod listing_catalogue;
mod listing_repository;
mod password_hasher;
mod property_request_command;
mod property_request_query;
mod property_request_repository;
mod token_service;
mod user_repository;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::AccountCommand;
pub use identity_resolver::IdentityResolver;
#[cfg(test)]
pub use listing_catalogue::MockListingCatalogue;
pub use listing_catalogue::ListingCatalogue;
#[cfg(test)]
pub use listing_repository::MockListingRepository;
pub use listing_repository::{ListingRepository, ListingRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use property_request_command::MockPropertyRequestCommand;
pub use property_request_command::PropertyRequestCommand;
#[cfg(test)]
pub use property_request_query::MockPropertyRequestQuery;
pub use property_request_query::PropertyRequestQuery;
#[cfg(test)]
pub use property_request_repository::MockPropertyRequestRepository;
pub use property_request_repository::{
    PropertyRequestRepository, PropertyRequestRepositoryError, StatusUpdate,
};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
