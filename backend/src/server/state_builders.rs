//! Builders wiring repositories, security adapters and domain services into
//! the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use backend::domain::ports::{
    ListingRepository, PasswordHasher, PropertyRequestRepository, TokenService, UserRepository,
};
use backend::domain::{AccountService, ListingService, PropertyRequestService, TokenSecret};
use backend::inbound::http::session::SessionSettings;
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::memory::{
    InMemoryListingRepository, InMemoryPropertyRequestRepository, InMemoryUserRepository,
};
use backend::outbound::persistence::{
    DbPool, DieselListingRepository, DieselPropertyRequestRepository, DieselUserRepository,
};
use backend::outbound::security::{Argon2PasswordHasher, JwtTokenService};
use backend::settings::SeedAdmin;

use super::ServerConfig;

pub(crate) type Accounts =
    AccountService<dyn UserRepository, dyn PasswordHasher, dyn TokenService>;
pub(crate) type Requests =
    PropertyRequestService<dyn PropertyRequestRepository, dyn ListingRepository>;
pub(crate) type Listings = ListingService<dyn ListingRepository>;

/// Repository adapters shared by every service.
pub(crate) struct Repositories {
    users: Arc<dyn UserRepository>,
    listings: Arc<dyn ListingRepository>,
    requests: Arc<dyn PropertyRequestRepository>,
}

impl Repositories {
    fn from_pool(pool: &DbPool) -> Self {
        Self {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            listings: Arc::new(DieselListingRepository::new(pool.clone())),
            requests: Arc::new(DieselPropertyRequestRepository::new(pool.clone())),
        }
    }

    fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            listings: Arc::new(InMemoryListingRepository::new()),
            requests: Arc::new(InMemoryPropertyRequestRepository::new()),
        }
    }

    /// Pick the PostgreSQL adapters when a pool is configured.
    pub(crate) fn for_pool(pool: Option<&DbPool>) -> Self {
        match pool {
            Some(pool) => Self::from_pool(pool),
            None => {
                warn!("no database configured; state is kept in memory and lost on restart");
                Self::in_memory()
            }
        }
    }
}

/// Domain services backing the HTTP ports.
pub(crate) struct Services {
    pub(crate) accounts: Arc<Accounts>,
    pub(crate) requests: Arc<Requests>,
    pub(crate) listings: Arc<Listings>,
}

/// Construct the domain services over `repositories`.
pub(crate) fn build_services(
    repositories: Repositories,
    token_secret: &TokenSecret,
    token_ttl: chrono::Duration,
    clock: Arc<dyn Clock>,
) -> Services {
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let tokens: Arc<dyn TokenService> =
        Arc::new(JwtTokenService::new(token_secret, token_ttl, clock.clone()));
    let Repositories {
        users,
        listings,
        requests,
    } = repositories;

    Services {
        accounts: Arc::new(AccountService::new(users, hasher, tokens, clock.clone())),
        requests: Arc::new(PropertyRequestService::new(
            requests,
            listings.clone(),
            clock.clone(),
        )),
        listings: Arc::new(ListingService::new(listings, clock)),
    }
}

/// Build the services described by `config` using the system clock.
pub(crate) fn build_services_for(config: &ServerConfig) -> Services {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    build_services(
        Repositories::for_pool(config.db_pool.as_ref()),
        &config.token_secret,
        config.token_ttl,
        clock,
    )
}

/// Provision the configured administrator account if it does not exist.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the account store rejects the insert.
pub(crate) async fn seed_admin(
    accounts: &Accounts,
    seed: Option<&SeedAdmin>,
) -> std::io::Result<()> {
    let Some(seed) = seed else {
        return Ok(());
    };
    let created = accounts
        .ensure_admin(&seed.email, seed.password.as_str())
        .await
        .map_err(|err| std::io::Error::other(format!("admin seeding failed: {err}")))?;
    if !created {
        info!(email = %seed.email, "administrator account already present");
    }
    Ok(())
}

/// Share the services with handlers through [`HttpState`].
pub(crate) fn build_http_state(
    services: &Services,
    session: SessionSettings,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        HttpStatePorts {
            accounts: services.accounts.clone(),
            identities: services.accounts.clone(),
            requests: services.requests.clone(),
            requests_query: services.requests.clone(),
            listings: services.listings.clone(),
        },
        session,
    ))
}
