//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommand, IdentityResolver, ListingCatalogue, PropertyRequestCommand,
    PropertyRequestQuery,
};

use super::session::SessionSettings;

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountCommand>,
    pub identities: Arc<dyn IdentityResolver>,
    pub requests: Arc<dyn PropertyRequestCommand>,
    pub requests_query: Arc<dyn PropertyRequestQuery>,
    pub listings: Arc<dyn ListingCatalogue>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub identities: Arc<dyn IdentityResolver>,
    pub requests: Arc<dyn PropertyRequestCommand>,
    pub requests_query: Arc<dyn PropertyRequestQuery>,
    pub listings: Arc<dyn ListingCatalogue>,
    pub session: SessionSettings,
}

impl HttpState {
    /// Construct state from the port bundle and the auth cookie settings.
    pub fn new(ports: HttpStatePorts, session: SessionSettings) -> Self {
        let HttpStatePorts {
            accounts,
            identities,
            requests,
            requests_query,
            listings,
        } = ports;
        Self {
            accounts,
            identities,
            requests,
            requests_query,
            listings,
            session,
        }
    }
}
