//! User identity and the sign-up form schema.
//!
//! Keeps inbound payload parsing out of handlers: the raw field bag is
//! parsed here into validated newtypes, or into a field-keyed error report
//! with every failing field recorded.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::forms::FieldErrors;
use crate::domain::password::HashedPassword;

/// Minimum password length accepted at sign-up.
pub const PASSWORD_MIN_CHARS: usize = 6;

/// Message recorded against a missing or blank `name` field.
pub const MSG_ENTER_NAME: &str = "Please enter your name.";
/// Message recorded against a syntactically invalid `email` field.
pub const MSG_INVALID_EMAIL: &str = "Invalid email format.";
/// Message recorded against a too-short `password` field.
pub const MSG_PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters long.";

/// Validation errors raised by the user newtype constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifier was not a valid UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// Name was missing or blank once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// Email did not match the expected syntax.
    #[error("email address is not syntactically valid")]
    InvalidEmail,
    /// Password was shorter than [`PASSWORD_MIN_CHARS`].
    #[error("password must be at least {PASSWORD_MIN_CHARS} characters")]
    PasswordTooShort,
}

/// Stable user identifier, generated at sign-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier already known to be a UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse an identifier from its string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name supplied at sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Validate and construct a name; surrounding whitespace is trimmed.
    pub fn new(name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Syntactic check only: local part, "@", dotted domain.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an address.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let email = email.as_ref();
        if !email_regex().is_match(email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Plaintext password accepted at sign-up.
///
/// Held only long enough to hash it and to attempt the follow-up sign-in;
/// the backing string is zeroed on drop and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate and construct a password.
    pub fn new(password: impl Into<String>) -> Result<Self, UserValidationError> {
        let password = password.into();
        if password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(UserValidationError::PasswordTooShort);
        }
        Ok(Self(Zeroizing::new(password)))
    }

    /// The plaintext, for hashing and the sign-in attempt.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Application user as persisted.
///
/// ## Invariants
/// - `email` is syntactically valid.
/// - `password_hash` is the argon2 hash; the plaintext is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: PersonName,
    email: EmailAddress,
    password_hash: HashedPassword,
}

impl User {
    /// Assemble a user from validated components.
    pub fn new(
        id: UserId,
        name: PersonName,
        email: EmailAddress,
        password_hash: HashedPassword,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &PersonName {
        &self.name
    }

    /// Email address used for sign-in.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Stored password hash.
    pub fn password_hash(&self) -> &HashedPassword {
        &self.password_hash
    }
}

/// Raw sign-up form fields as submitted, before validation.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SignupFormInput {
    /// Display name field.
    pub name: Option<String>,
    /// Email field.
    pub email: Option<String>,
    /// Plaintext password field.
    pub password: Option<String>,
}

/// Typed sign-up fields produced by a successful parse.
#[derive(Debug, Clone)]
pub struct SignupFields {
    /// Validated display name.
    pub name: PersonName,
    /// Validated email address.
    pub email: EmailAddress,
    /// Validated plaintext password.
    pub password: Password,
}

impl SignupFields {
    /// Parse the raw field bag, collecting every failing field.
    pub fn parse(input: &SignupFormInput) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = match input.name.as_deref().map(PersonName::new) {
            Some(Ok(name)) => Some(name),
            _ => {
                errors.push("name", MSG_ENTER_NAME);
                None
            }
        };

        let email = match input.email.as_deref().map(EmailAddress::new) {
            Some(Ok(email)) => Some(email),
            _ => {
                errors.push("email", MSG_INVALID_EMAIL);
                None
            }
        };

        let password = match input.password.clone().map(Password::new) {
            Some(Ok(password)) => Some(password),
            _ => {
                errors.push("password", MSG_PASSWORD_TOO_SHORT);
                None
            }
        };

        match (name, email, password) {
            (Some(name), Some(email), Some(password)) if errors.is_empty() => Ok(Self {
                name,
                email,
                password,
            }),
            _ => Err(errors),
        }
    }
}
