//! Account identity model.
//!
//! A [`User`] is the authenticated principal threaded through every protected
//! operation. Client-facing projections ([`UserSummary`], [`UserProfile`])
//! never carry the password hash.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Maximum length accepted for first and last names.
pub const PERSON_NAME_MAX: usize = 100;

/// Validation errors raised by the identity value types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier was not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// A name was blank once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// A name exceeded [`PERSON_NAME_MAX`] characters.
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    /// The email address was not of the form `local@domain`.
    #[error("email address must contain a single '@' between non-empty parts")]
    InvalidEmail,
    /// The stored password hash was blank.
    #[error("password hash must not be empty")]
    EmptyPasswordHash,
    /// The role was neither `user` nor `admin`.
    #[error("unknown role: {value}")]
    UnknownRole { value: String },
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its textual form.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::UserId;
    ///
    /// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
    /// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    /// assert!(UserId::new("alice").is_err());
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// First or last name; trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Validate and construct a [`PersonName`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if trimmed.chars().count() > PERSON_NAME_MAX {
            return Err(UserValidationError::NameTooLong {
                max: PERSON_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Login identifier.
///
/// Emails are trimmed but otherwise compared exactly, so `Ada@x.io` and
/// `ada@x.io` are distinct accounts.
///
/// # Examples
/// ```
/// use backend::domain::EmailAddress;
///
/// let email = EmailAddress::new(" ada@example.com ").expect("valid email");
/// assert_eq!(email.as_ref(), "ada@example.com");
/// assert!(EmailAddress::new("ada@@example.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = value.as_ref().trim();
        let mut parts = trimmed.split('@');
        let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(UserValidationError::InvalidEmail);
        };
        if local.is_empty() || domain.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-text contact number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Build a phone number, treating blank input as absent.
    #[must_use]
    pub fn parse_optional(value: Option<&str>) -> Option<Self> {
        value
            .map(str::trim)
            .filter(|phone| !phone.is_empty())
            .map(|phone| Self(phone.to_owned()))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// PHC-formatted password hash. Never serialised.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a [`crate::domain::ports::PasswordHasher`].
    pub fn new(encoded: impl Into<String>) -> Result<Self, UserValidationError> {
        let encoded = encoded.into();
        if encoded.trim().is_empty() {
            return Err(UserValidationError::EmptyPasswordHash);
        }
        Ok(Self(encoded))
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Closed set of account roles.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular account; may submit property requests.
    #[default]
    User,
    /// Administrator; manages listings and decides requests.
    Admin,
}

impl Role {
    /// Stable storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(UserValidationError::UnknownRole {
                value: other.to_owned(),
            }),
        }
    }
}

/// Validated fields used to assemble a [`User`].
#[derive(Debug, Clone)]
pub struct UserParts {
    /// Identifier.
    pub id: UserId,
    /// Given name.
    pub first_name: PersonName,
    /// Family name.
    pub last_name: PersonName,
    /// Unique login email.
    pub email: EmailAddress,
    /// Optional contact number.
    pub phone: Option<PhoneNumber>,
    /// Encoded password hash.
    pub password_hash: PasswordHash,
    /// Account role.
    pub role: Role,
    /// Account creation instant.
    pub created_at: DateTime<Utc>,
}

/// Registered account.
///
/// ## Invariants
/// - `email` is unique across accounts.
/// - `role` is set at creation; registration only ever yields [`Role::User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    first_name: PersonName,
    last_name: PersonName,
    email: EmailAddress,
    phone: Option<PhoneNumber>,
    password_hash: PasswordHash,
    role: Role,
    created_at: DateTime<Utc>,
}

impl User {
    /// Assemble a user from validated parts.
    #[must_use]
    pub fn new(parts: UserParts) -> Self {
        let UserParts {
            id,
            first_name,
            last_name,
            email,
            phone,
            password_hash,
            role,
            created_at,
        } = parts;
        Self {
            id,
            first_name,
            last_name,
            email,
            phone,
            password_hash,
            role,
            created_at,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Given name.
    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    /// Family name.
    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    /// Login email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Contact number, if any.
    pub fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }

    /// Encoded password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Account role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether the account holds [`Role::Admin`].
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Creation instant.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Client-facing projection without contact details.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            first_name: self.first_name.as_ref().to_owned(),
            last_name: self.last_name.as_ref().to_owned(),
            email: self.email.as_ref().to_owned(),
            role: self.role,
        }
    }

    /// Client-facing projection including the phone number.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            summary: self.summary(),
            phone: self.phone.as_ref().map(|phone| phone.as_ref().to_owned()),
        }
    }
}

/// Identity summary returned by login, registration and status checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// Account identifier.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: UserId,
    /// Given name.
    #[schema(example = "Ada")]
    pub first_name: String,
    /// Family name.
    #[schema(example = "Lovelace")]
    pub last_name: String,
    /// Login email.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Account role.
    pub role: Role,
}

/// Full profile of the calling account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    #[schema(inline)]
    summary: UserSummary,
    /// Contact number, when provided at registration.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "+40 721 000 000")]
    pub phone: Option<String>,
}

impl UserProfile {
    /// Summary fields shared with [`UserSummary`].
    pub fn summary(&self) -> &UserSummary {
        &self.summary
    }
}

#[cfg(test)]
mod tests;
