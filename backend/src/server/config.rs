//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use backend::domain::TokenSecret;
use backend::inbound::http::session::SessionSettings;
use backend::outbound::persistence::DbPool;
use backend::settings::{RuntimeSettings, SeedAdmin};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) session: SessionSettings,
    pub(crate) token_secret: TokenSecret,
    pub(crate) token_ttl: chrono::Duration,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) seed_admin: Option<SeedAdmin>,
}

impl ServerConfig {
    /// Derive the server configuration from validated runtime settings.
    ///
    /// The database pool is attached separately because building it needs
    /// an async context.
    #[must_use]
    pub fn from_settings(settings: RuntimeSettings) -> Self {
        let session = SessionSettings::new(
            settings.token_ttl,
            settings.cookie_secure,
            settings.same_site,
        );
        Self {
            bind_addr: settings.bind_addr,
            session,
            token_secret: settings.token_secret,
            token_ttl: settings.token_ttl,
            db_pool: None,
            seed_admin: settings.seed_admin,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without one the server keeps all state in process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
