//! Account data model.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::auth::PasswordHash;

/// Validation errors returned when constructing account value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    /// The identifier was empty or not a UUID.
    InvalidId,
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Username fell below the minimum length.
    UsernameTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// Username exceeded the maximum length.
    UsernameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Username contained characters outside the accepted set.
    UsernameInvalidCharacters,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters")
            }
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "username may only contain letters, numbers, underscores, hyphens, or dots",
            ),
        }
    }
}

impl std::error::Error for AccountValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from string input.
    pub fn parse(id: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| AccountValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an already-parsed UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 50;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        let pattern = r"^[A-Za-z0-9_.\-]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Unique login name for an account.
///
/// ## Invariants
/// - Trimmed of surrounding whitespace.
/// - Between [`USERNAME_MIN`] and [`USERNAME_MAX`] characters.
/// - Restricted to letters, digits, `_`, `-`, and `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, AccountValidationError> {
        Self::from_owned(username.into())
    }

    fn from_owned(username: String) -> Result<Self, AccountValidationError> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmptyUsername);
        }

        let length = trimmed.chars().count();
        if length < USERNAME_MIN {
            return Err(AccountValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(AccountValidationError::UsernameTooLong { max: USERNAME_MAX });
        }

        if !username_regex().is_match(trimmed) {
            return Err(AccountValidationError::UsernameInvalidCharacters);
        }

        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Registered account as seen by the domain.
///
/// The password never appears here; only its salted hash does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: UserId,
    username: Username,
    password_hash: PasswordHash,
}

impl Account {
    /// Assemble an account from validated parts.
    #[must_use]
    pub const fn new(id: UserId, username: Username, password_hash: PasswordHash) -> Self {
        Self {
            id,
            username,
            password_hash,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Unique login name.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Salted credential hash stored at rest.
    #[must_use]
    pub const fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", AccountValidationError::EmptyUsername)]
    #[case("   ", AccountValidationError::EmptyUsername)]
    #[case("ab", AccountValidationError::UsernameTooShort { min: USERNAME_MIN })]
    #[case("name with spaces", AccountValidationError::UsernameInvalidCharacters)]
    #[case("émile", AccountValidationError::UsernameInvalidCharacters)]
    fn rejects_invalid_usernames(#[case] input: &str, #[case] expected: AccountValidationError) {
        let err = Username::new(input).expect_err("invalid username must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn rejects_overlong_username() {
        let input = "a".repeat(USERNAME_MAX + 1);
        let err = Username::new(input).expect_err("overlong username must fail");
        assert_eq!(
            err,
            AccountValidationError::UsernameTooLong { max: USERNAME_MAX }
        );
    }

    #[rstest]
    #[case("ada")]
    #[case("  grace.hopper  ")]
    #[case("user-42_x")]
    fn accepts_and_trims_valid_usernames(#[case] input: &str) {
        let username = Username::new(input).expect("valid username");
        assert_eq!(username.as_ref(), input.trim());
    }

    #[test]
    fn user_id_parse_rejects_garbage() {
        assert_eq!(
            UserId::parse("not-a-uuid").expect_err("must fail"),
            AccountValidationError::InvalidId
        );
    }

    #[test]
    fn user_id_round_trips_through_display() {
        let id = UserId::random();
        let reparsed = UserId::parse(id.to_string()).expect("display output parses");
        assert_eq!(id, reparsed);
    }
}
