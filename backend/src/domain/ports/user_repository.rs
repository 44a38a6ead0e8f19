//! Driven port for account persistence.

use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The call did not finish within the configured deadline.
        Timeout { operation: String } => "user repository timed out during {operation}",
        /// Another account already uses this email.
        DuplicateEmail { email: String } => "user with email {email} already exists",
    }
}

/// Credential store keyed by id and by email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account; a taken email yields
    /// [`UserRepositoryError::DuplicateEmail`].
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch an account by exact email.
    async fn find_by_email(&self, email: &EmailAddress)
    -> Result<Option<User>, UserRepositoryError>;

    /// Whether an account uses this exact email.
    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserRepositoryError>;
}
