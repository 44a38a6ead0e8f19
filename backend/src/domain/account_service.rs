//! Account domain service.
//!
//! Implements registration, login and session-token resolution on top of the
//! credential store, the password hasher and the token codec.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    AccountCommand, IdentityResolver, PasswordHasher, PasswordHasherError, TokenService,
    UserRepository,
};
use crate::domain::repository_errors::{
    map_hasher_error, map_token_issue_error, map_user_repository_error,
};
use crate::domain::timestamps::stored_now;
use crate::domain::{
    AuthSession, EmailAddress, Error, LoginCredentials, PasswordHash, PersonName,
    RegistrationDetails, Role, User, UserId, UserParts,
};

/// Message returned for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Plaintext behind the decoy hash checked when a login names no account.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Account service implementing [`AccountCommand`] and [`IdentityResolver`].
pub struct AccountService<U: ?Sized, H: ?Sized, T: ?Sized> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
    decoy_hash: Arc<OnceCell<PasswordHash>>,
}

impl<U: ?Sized, H: ?Sized, T: ?Sized> Clone for AccountService<U, H, T> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            hasher: Arc::clone(&self.hasher),
            tokens: Arc::clone(&self.tokens),
            clock: Arc::clone(&self.clock),
            decoy_hash: Arc::clone(&self.decoy_hash),
        }
    }
}

impl<U: ?Sized, H: ?Sized, T: ?Sized> AccountService<U, H, T> {
    /// Create a new account service.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
            decoy_hash: Arc::new(OnceCell::new()),
        }
    }
}

impl<U, H, T> AccountService<U, H, T>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenService + ?Sized,
{
    fn open_session(&self, user: User) -> Result<AuthSession, Error> {
        let token = self
            .tokens
            .issue(user.id())
            .map_err(|err| map_token_issue_error(&err))?;
        Ok(AuthSession { token, user })
    }

    async fn password_matches(&self, password: &str, user: &User) -> Result<bool, Error> {
        match self.hasher.verify(password, user.password_hash()).await {
            Ok(matches) => Ok(matches),
            Err(PasswordHasherError::MalformedHash { message }) => {
                warn!(user_id = %user.id(), %message, "stored password hash is unreadable");
                Ok(false)
            }
            Err(err) => Err(map_hasher_error(&err)),
        }
    }

    /// Spend one verification on a login that names no account.
    ///
    /// Keeps unknown emails as slow as wrong passwords. The outcome is
    /// discarded.
    async fn verify_decoy(&self, password: &str) {
        let decoy = self
            .decoy_hash
            .get_or_try_init(|| self.hasher.hash(DECOY_PASSWORD))
            .await;
        match decoy {
            Ok(hash) => {
                if let Err(err) = self.hasher.verify(password, hash).await {
                    warn!(error = %err, "decoy password verification failed");
                }
            }
            Err(err) => warn!(error = %err, "decoy password hash unavailable"),
        }
    }

    /// Provision an administrator account unless the email is already taken.
    ///
    /// Used for development seeding; returns `false` when the account existed.
    pub async fn ensure_admin(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<bool, Error> {
        let exists = self
            .users
            .exists_by_email(email)
            .await
            .map_err(map_user_repository_error)?;
        if exists {
            return Ok(false);
        }
        let password_hash = self
            .hasher
            .hash(password)
            .await
            .map_err(|err| map_hasher_error(&err))?;
        let admin = User::new(UserParts {
            id: UserId::random(),
            first_name: PersonName::new("Site").map_err(|err| Error::internal(err.to_string()))?,
            last_name: PersonName::new("Administrator")
                .map_err(|err| Error::internal(err.to_string()))?,
            email: email.clone(),
            phone: None,
            password_hash,
            role: Role::Admin,
            created_at: stored_now(&*self.clock),
        });
        self.users
            .insert(&admin)
            .await
            .map_err(map_user_repository_error)?;
        info!(user_id = %admin.id(), "administrator account provisioned");
        Ok(true)
    }
}

#[async_trait]
impl<U, H, T> AccountCommand for AccountService<U, H, T>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenService + ?Sized,
{
    async fn register(&self, details: RegistrationDetails) -> Result<AuthSession, Error> {
        let taken = self
            .users
            .exists_by_email(details.email())
            .await
            .map_err(map_user_repository_error)?;
        if taken {
            return Err(Error::conflict("user with this email already exists"));
        }

        let password_hash = self
            .hasher
            .hash(details.password())
            .await
            .map_err(|err| map_hasher_error(&err))?;
        let user = User::new(UserParts {
            id: UserId::random(),
            first_name: details.first_name().clone(),
            last_name: details.last_name().clone(),
            email: details.email().clone(),
            phone: details.phone().cloned(),
            password_hash,
            role: Role::User,
            created_at: stored_now(&*self.clock),
        });

        // The unique index still guards against a concurrent registration.
        self.users
            .insert(&user)
            .await
            .map_err(map_user_repository_error)?;
        info!(user_id = %user.id(), "account registered");

        self.open_session(user)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error> {
        let Ok(email) = EmailAddress::new(credentials.email()) else {
            debug!("login rejected: malformed email");
            self.verify_decoy(credentials.password()).await;
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let Some(user) = self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_user_repository_error)?
        else {
            debug!("login rejected: unknown email");
            self.verify_decoy(credentials.password()).await;
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        if !self.password_matches(credentials.password(), &user).await? {
            debug!(user_id = %user.id(), "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        info!(user_id = %user.id(), "login succeeded");
        self.open_session(user)
    }
}

#[async_trait]
impl<U, H, T> IdentityResolver for AccountService<U, H, T>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenService + ?Sized,
{
    async fn resolve(&self, token: &str) -> Result<User, Error> {
        let user_id = self.tokens.validate(token).map_err(|err| {
            debug!(error = %err, "session token rejected");
            Error::unauthorized("invalid token")
        })?;

        self.users
            .find_by_id(&user_id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| {
                debug!(%user_id, "session token names a missing account");
                Error::unauthorized("user not found")
            })
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
