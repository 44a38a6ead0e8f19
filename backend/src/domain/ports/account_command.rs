//! Driving port for account registration and login.

use async_trait::async_trait;

use crate::domain::{AuthSession, Error, LoginCredentials, RegistrationDetails};

/// Account use-cases invoked by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create a `user` account and open a session for it.
    async fn register(&self, details: RegistrationDetails) -> Result<AuthSession, Error>;

    /// Check credentials and open a session.
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error>;
}
