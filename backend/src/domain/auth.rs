//! Authentication primitives: login credentials, registration details and
//! the session handed back to clients.
//!
//! Inbound adapters build these from raw payloads so services only ever see
//! validated values. Passwords are held in [`Zeroizing`] buffers.

use zeroize::Zeroizing;

use super::{EmailAddress, PersonName, PhoneNumber, SessionToken, User, UserValidationError};

/// Minimum accepted password length, in characters.
pub const PASSWORD_MIN_LEN: usize = 6;

/// Errors returned when login or registration payloads are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Password shorter than [`PASSWORD_MIN_LEN`].
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    /// A profile field failed validation.
    #[error("{field}: {source}")]
    InvalidField {
        field: &'static str,
        #[source]
        source: UserValidationError,
    },
}

impl CredentialsValidationError {
    /// Name of the payload field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyEmail => "email",
            Self::EmptyPassword | Self::PasswordTooShort { .. } => "password",
            Self::InvalidField { field, .. } => *field,
        }
    }
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and non-empty. It is not format-checked: a malformed
///   address simply matches no account.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada@example.com ", "hunter22").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// assert_eq!(creds.password(), "hunter22");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the account lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Raw registration payload fields.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationInput<'a> {
    /// Given name.
    pub first_name: &'a str,
    /// Family name.
    pub last_name: &'a str,
    /// Login email.
    pub email: &'a str,
    /// Optional contact number.
    pub phone: Option<&'a str>,
    /// Plain-text password.
    pub password: &'a str,
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDetails {
    first_name: PersonName,
    last_name: PersonName,
    email: EmailAddress,
    phone: Option<PhoneNumber>,
    password: Zeroizing<String>,
}

impl RegistrationDetails {
    /// Validate a registration payload.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{RegistrationDetails, RegistrationInput};
    ///
    /// let details = RegistrationDetails::try_from_input(RegistrationInput {
    ///     first_name: "Ada",
    ///     last_name: "Lovelace",
    ///     email: "ada@example.com",
    ///     phone: None,
    ///     password: "analytical",
    /// })
    /// .expect("valid registration");
    /// assert_eq!(details.email().as_ref(), "ada@example.com");
    /// ```
    pub fn try_from_input(input: RegistrationInput<'_>) -> Result<Self, CredentialsValidationError> {
        let field = |field: &'static str| {
            move |source| CredentialsValidationError::InvalidField { field, source }
        };
        let first_name = PersonName::new(input.first_name).map_err(field("firstName"))?;
        let last_name = PersonName::new(input.last_name).map_err(field("lastName"))?;
        if input.email.trim().is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        let email = EmailAddress::new(input.email).map_err(field("email"))?;
        if input.password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        if input.password.chars().count() < PASSWORD_MIN_LEN {
            return Err(CredentialsValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LEN,
            });
        }
        Ok(Self {
            first_name,
            last_name,
            email,
            phone: PhoneNumber::parse_optional(input.phone),
            password: Zeroizing::new(input.password.to_owned()),
        })
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

    /// Contact number, if given.
    pub fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }

    /// Plain-text password to be hashed.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Outcome of a successful login or registration.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Signed session token.
    pub token: SessionToken,
    /// Authenticated account.
    pub user: User,
}
