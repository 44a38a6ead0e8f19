//! Driven port for issuing and validating session tokens.

use crate::domain::{SessionToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by token adapters.
    ///
    /// Every validation failure collapses to `InvalidToken` so callers never
    /// learn why a token was rejected.
    pub enum TokenError {
        /// Signing failed.
        Issue { message: String } => "failed to issue session token: {message}",
        /// The token is malformed, tampered with, expired or names no valid subject.
        InvalidToken => "invalid session token",
    }
}

/// Stateless session token codec.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a token for `user_id` valid for the configured lifetime.
    fn issue(&self, user_id: &UserId) -> Result<SessionToken, TokenError>;

    /// Validate `token` and return the subject it was issued for.
    fn validate(&self, token: &str) -> Result<UserId, TokenError>;
}
