//! Driving port used by the authentication extractor.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Resolve a presented session token to the account it was issued for.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Validate `token` and load its account.
    ///
    /// Fails with `unauthorized` when the token is invalid or expired, or
    /// when the account no longer exists.
    async fn resolve(&self, token: &str) -> Result<User, Error>;
}
