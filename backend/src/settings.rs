//! Application configuration loaded via OrthoConfig.
//!
//! [`AppSettings`] is the raw layer read from CLI flags, `GATOR_*`
//! environment variables and configuration files. [`AppSettings::validate`]
//! turns it into [`RuntimeSettings`], applying defaults and the release-build
//! rules for the token signing secret.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::cookie::SameSite;
use ortho_config::OrthoConfig;
use rand::RngCore;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::{EmailAddress, TOKEN_SECRET_MIN_LEN, TokenSecret};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5500";
const DEFAULT_TOKEN_TTL_HOURS: u32 = 24;
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate a missing signing secret.
    Debug,
    /// Release builds require an explicit, full-length secret.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use backend::settings::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Raw configuration values.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GATOR")]
pub struct AppSettings {
    /// Socket address to listen on; defaults to `0.0.0.0:5500`.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. When absent the in-memory store is used.
    pub database_url: Option<String>,
    /// HS256 signing secret for session tokens.
    pub jwt_secret: Option<String>,
    /// Session token lifetime in hours; defaults to 24.
    pub token_ttl_hours: Option<u32>,
    /// Deadline for each store call in seconds; defaults to 10.
    pub store_timeout_secs: Option<u64>,
    /// Mark the auth cookie `Secure`; defaults to `true`.
    pub cookie_secure: Option<bool>,
    /// `SameSite` policy for the auth cookie: `Strict`, `Lax` or `None`.
    pub cookie_same_site: Option<String>,
    /// Email of an administrator provisioned at startup.
    pub seed_admin_email: Option<String>,
    /// Password for the provisioned administrator.
    pub seed_admin_password: Option<String>,
}

impl std::fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("store_timeout_secs", &self.store_timeout_secs)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("seed_admin_email", &self.seed_admin_email)
            .finish_non_exhaustive()
    }
}

/// Errors raised while validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A value is present but malformed.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidValue {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Release builds need a signing secret.
    #[error("GATOR_JWT_SECRET must be set in release builds")]
    MissingSecret,
    /// The signing secret is shorter than the HS256 minimum.
    #[error("GATOR_JWT_SECRET too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort { length: usize, min_len: usize },
    /// `SameSite=None` cookies must also be `Secure`.
    #[error("GATOR_COOKIE_SAME_SITE=None requires GATOR_COOKIE_SECURE=true")]
    InsecureSameSiteNone,
    /// Only one of the seed admin fields was provided.
    #[error("GATOR_SEED_ADMIN_EMAIL and GATOR_SEED_ADMIN_PASSWORD must be set together")]
    IncompleteSeedAdmin,
}

/// Administrator provisioned at startup.
#[derive(Clone)]
pub struct SeedAdmin {
    pub email: EmailAddress,
    pub password: Zeroizing<String>,
}

impl std::fmt::Debug for SeedAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedAdmin")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated settings consumed by the server bootstrap.
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    pub bind_addr: SocketAddr,
    pub database_url: Option<String>,
    pub token_secret: TokenSecret,
    pub token_ttl: chrono::Duration,
    pub store_timeout: Duration,
    pub cookie_secure: bool,
    pub same_site: SameSite,
    pub seed_admin: Option<SeedAdmin>,
}

fn parse_same_site(raw: Option<&str>) -> Result<SameSite, ConfigError> {
    let Some(raw) = raw else {
        return Ok(SameSite::Strict);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "strict" => Ok(SameSite::Strict),
        "lax" => Ok(SameSite::Lax),
        "none" => Ok(SameSite::None),
        _ => Err(ConfigError::InvalidValue {
            name: "GATOR_COOKIE_SAME_SITE",
            value: raw.to_owned(),
            expected: SAMESITE_EXPECTED,
        }),
    }
}

fn ephemeral_secret() -> TokenSecret {
    let mut bytes = Zeroizing::new(vec![0_u8; TOKEN_SECRET_MIN_LEN * 2]);
    rand::thread_rng().fill_bytes(bytes.as_mut_slice());
    TokenSecret::new(bytes.to_vec())
}

fn resolve_secret(raw: Option<&str>, mode: BuildMode) -> Result<TokenSecret, ConfigError> {
    let Some(raw) = raw.filter(|value| !value.is_empty()) else {
        if mode.is_debug() {
            warn!("GATOR_JWT_SECRET not set; using an ephemeral secret (dev only)");
            return Ok(ephemeral_secret());
        }
        return Err(ConfigError::MissingSecret);
    };
    let secret = TokenSecret::new(raw.as_bytes().to_vec());
    if secret.len() < TOKEN_SECRET_MIN_LEN {
        if mode.is_debug() {
            warn!(
                length = secret.len(),
                min_len = TOKEN_SECRET_MIN_LEN,
                "GATOR_JWT_SECRET shorter than recommended (dev only)"
            );
        } else {
            return Err(ConfigError::SecretTooShort {
                length: secret.len(),
                min_len: TOKEN_SECRET_MIN_LEN,
            });
        }
    }
    Ok(secret)
}

impl AppSettings {
    fn seed_admin(&self) -> Result<Option<SeedAdmin>, ConfigError> {
        match (&self.seed_admin_email, &self.seed_admin_password) {
            (None, None) => Ok(None),
            (Some(email), Some(password)) => {
                let email = EmailAddress::new(email).map_err(|_| ConfigError::InvalidValue {
                    name: "GATOR_SEED_ADMIN_EMAIL",
                    value: email.clone(),
                    expected: "an email address",
                })?;
                Ok(Some(SeedAdmin {
                    email,
                    password: Zeroizing::new(password.clone()),
                }))
            }
            _ => Err(ConfigError::IncompleteSeedAdmin),
        }
    }

    /// Apply defaults and validate values for the given build mode.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for malformed values, and in release builds
    /// when the signing secret is missing or too short.
    pub fn validate(self, mode: BuildMode) -> Result<RuntimeSettings, ConfigError> {
        let raw_addr = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        let bind_addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidValue {
                name: "GATOR_BIND_ADDR",
                value: raw_addr.to_owned(),
                expected: "host:port",
            })?;

        let ttl_hours = self.token_ttl_hours.unwrap_or(DEFAULT_TOKEN_TTL_HOURS);
        if ttl_hours == 0 {
            return Err(ConfigError::InvalidValue {
                name: "GATOR_TOKEN_TTL_HOURS",
                value: ttl_hours.to_string(),
                expected: "a positive number of hours",
            });
        }
        let timeout_secs = self
            .store_timeout_secs
            .unwrap_or(DEFAULT_STORE_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "GATOR_STORE_TIMEOUT_SECS",
                value: timeout_secs.to_string(),
                expected: "a positive number of seconds",
            });
        }

        let cookie_secure = self.cookie_secure.unwrap_or(true);
        let same_site = parse_same_site(self.cookie_same_site.as_deref())?;
        if same_site == SameSite::None && !cookie_secure {
            return Err(ConfigError::InsecureSameSiteNone);
        }

        let seed_admin = self.seed_admin()?;
        let token_secret = resolve_secret(self.jwt_secret.as_deref(), mode)?;

        Ok(RuntimeSettings {
            bind_addr,
            database_url: self.database_url.filter(|url| !url.trim().is_empty()),
            token_secret,
            token_ttl: chrono::Duration::hours(i64::from(ttl_hours)),
            store_timeout: Duration::from_secs(timeout_secs),
            cookie_secure,
            same_site,
            seed_admin,
        })
    }
}
