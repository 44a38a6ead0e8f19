//! Test helpers for inbound HTTP components.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    IdentityResolver, MockAccountCommand, MockListingCatalogue, MockPropertyRequestCommand,
    MockPropertyRequestQuery,
};
use crate::domain::test_fixtures::account;
use crate::domain::{Error, Role, User};

use super::session::SessionSettings;
use super::state::{HttpState, HttpStatePorts};

/// Identity resolver backed by a fixed token table.
#[derive(Default, Clone)]
pub(crate) struct StubIdentities {
    known: HashMap<String, User>,
}

impl StubIdentities {
    pub(crate) fn with(token: &str, user: User) -> Self {
        Self::default().and(token, user)
    }

    pub(crate) fn and(mut self, token: &str, user: User) -> Self {
        self.known.insert(token.to_owned(), user);
        self
    }
}

#[async_trait]
impl IdentityResolver for StubIdentities {
    async fn resolve(&self, token: &str) -> Result<User, Error> {
        self.known
            .get(token)
            .cloned()
            .ok_or_else(|| Error::unauthorized("invalid token"))
    }
}

pub(crate) fn user_with_role(role: Role) -> User {
    let email = match role {
        Role::User => "ada@example.com",
        Role::Admin => "admin@example.com",
    };
    account(email, role)
}

/// Port doubles for handler tests; unset mocks panic when called.
#[derive(Default)]
pub(crate) struct TestPorts {
    pub(crate) accounts: MockAccountCommand,
    pub(crate) identities: StubIdentities,
    pub(crate) requests: MockPropertyRequestCommand,
    pub(crate) requests_query: MockPropertyRequestQuery,
    pub(crate) listings: MockListingCatalogue,
}

impl TestPorts {
    pub(crate) fn into_state(self) -> HttpState {
        HttpState::new(
            HttpStatePorts {
                accounts: Arc::new(self.accounts),
                identities: Arc::new(self.identities),
                requests: Arc::new(self.requests),
                requests_query: Arc::new(self.requests_query),
                listings: Arc::new(self.listings),
            },
            SessionSettings::new(
                chrono::Duration::hours(24),
                false,
                actix_web::cookie::SameSite::Lax,
            ),
        )
    }
}

pub(crate) fn state_with_identities(identities: StubIdentities) -> HttpState {
    TestPorts {
        identities,
        ..TestPorts::default()
    }
    .into_state()
}
