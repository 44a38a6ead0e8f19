//! Auth cookie helpers.
//!
//! Login and registration hand the session token back twice: in the JSON
//! body for header-based clients and in the `authToken` cookie for browsers.
//! Logout expires the cookie; the token itself stays valid until `exp`.

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};

use crate::domain::SessionToken;

/// Name of the cookie carrying the session token.
pub const AUTH_COOKIE: &str = "authToken";

/// Attributes applied to the auth cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    max_age: CookieDuration,
    secure: bool,
    same_site: SameSite,
}

impl SessionSettings {
    /// Build settings with a cookie lifetime matching the token TTL.
    pub fn new(token_ttl: chrono::Duration, secure: bool, same_site: SameSite) -> Self {
        Self {
            max_age: CookieDuration::seconds(token_ttl.num_seconds()),
            secure,
            same_site,
        }
    }

    /// Cookie lifetime.
    pub fn max_age(&self) -> CookieDuration {
        self.max_age
    }

    /// Cookie carrying a freshly issued token.
    pub fn auth_cookie(&self, token: &SessionToken) -> Cookie<'static> {
        self.base(token.as_str().to_owned())
            .max_age(self.max_age)
            .finish()
    }

    /// Cookie that instructs the client to drop the auth cookie.
    pub fn expired_cookie(&self) -> Cookie<'static> {
        self.base(String::new())
            .max_age(CookieDuration::ZERO)
            .finish()
    }

    fn base(&self, value: String) -> actix_web::cookie::CookieBuilder<'static> {
        Cookie::build(AUTH_COOKIE, value)
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::new(chrono::Duration::hours(24), true, SameSite::Strict)
    }
}
