//! Session token and signing secret value types.

use std::fmt;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Minimum signing secret length accepted in release builds.
pub const TOKEN_SECRET_MIN_LEN: usize = 32;

/// Length of the secret fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Signed, opaque bearer token issued at login or registration.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl SessionToken {
    /// Wrap an encoded token together with its expiry.
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// Encoded token text.
    pub fn as_str(&self) -> &str {
        self.value.as_str()
    }

    /// Instant after which the token is rejected.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// HMAC signing secret for session tokens.
///
/// # Examples
/// ```
/// use backend::domain::TokenSecret;
///
/// let secret = TokenSecret::new(vec![7_u8; 32]);
/// assert_eq!(secret.fingerprint().len(), 16);
/// ```
#[derive(Clone)]
pub struct TokenSecret(Zeroizing<Vec<u8>>);

impl TokenSecret {
    /// Wrap raw secret bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    /// Raw secret bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    /// Secret length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Truncated SHA-256 fingerprint for logs; never reveals the secret.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.as_bytes());
        hex::encode(digest.get(..FINGERPRINT_BYTES).unwrap_or_default())
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenSecret({})", self.fingerprint())
    }
}
