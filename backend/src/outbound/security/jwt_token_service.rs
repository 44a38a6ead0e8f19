//! HS256 JWT implementation of the `TokenService` port.
//!
//! Tokens carry the account id as `sub` plus `iat`/`exp`. Expiry is checked
//! against the injected clock rather than the system time so lifetimes are
//! testable; the library's own `exp` check is disabled.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{SessionToken, TokenSecret, UserId};

/// Claims embedded in every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    /// Account identifier.
    sub: String,
    /// Issued at (unix seconds).
    iat: i64,
    /// Expiration (unix seconds).
    exp: i64,
}

/// Session token codec signing with a shared HMAC secret.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Build a codec for `secret` issuing tokens that live for `ttl`.
    pub fn new(secret: &TokenSecret, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub", "exp"]);
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
            clock,
        }
    }

    fn expiry_from(&self, issued_at: DateTime<Utc>) -> DateTime<Utc> {
        issued_at + self.ttl
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: &UserId) -> Result<SessionToken, TokenError> {
        let issued_at = self.clock.utc();
        let expires_at = self.expiry_from(issued_at);
        let claims = Claims {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| TokenError::issue(err.to_string()))?;
        Ok(SessionToken::new(token, expires_at))
    }

    fn validate(&self, token: &str) -> Result<UserId, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|err| {
                debug!(error = %err, "token failed verification");
                TokenError::invalid_token()
            })?
            .claims;

        if claims.exp <= self.clock.utc().timestamp() {
            debug!(exp = claims.exp, "token expired");
            return Err(TokenError::invalid_token());
        }

        Uuid::parse_str(&claims.sub)
            .map(UserId::from_uuid)
            .map_err(|_| {
                debug!("token subject is not an account id");
                TokenError::invalid_token()
            })
    }
}
