//! Authentication primitives: login credentials and the stored hash format.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::account::{AccountValidationError, Username};

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialValidationError {
    /// Username failed its own validation rules.
    Username(AccountValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username(inner) => inner.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Validated registration or login credentials.
///
/// ## Invariants
/// - `username` satisfies [`Username`] rules.
/// - `password` is non-empty but retains caller-provided whitespace to avoid
///   surprising credential comparisons.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: Username,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialValidationError> {
        let username = Username::new(username).map_err(CredentialValidationError::Username)?;

        if password.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }

        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username suitable for account lookups.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

const SALT_LEN: usize = 16;

/// Salted SHA-256 credential hash, stored as `<hex salt>$<hex digest>`.
///
/// The salt is generated per account, so identical passwords never share a
/// stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

/// Errors raised when parsing a stored hash back from persistence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashParseError {
    /// The stored value did not contain the `salt$digest` separator.
    #[error("stored password hash is missing its salt separator")]
    MissingSeparator,
    /// Either component was not valid lowercase hex of the expected length.
    #[error("stored password hash contains malformed hex")]
    MalformedHex,
}

impl PasswordHash {
    /// Derive a hash for a new password with a freshly generated salt.
    #[must_use]
    pub fn derive(password: &str) -> Self {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        Self::derive_with_salt(&salt, password)
    }

    fn derive_with_salt(salt: &[u8], password: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(password.as_bytes());
        let digest = hasher.finalize();
        Self(format!("{}${}", hex::encode(salt), hex::encode(digest)))
    }

    /// Check a candidate password against this hash.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        let Some((salt_hex, _)) = self.0.split_once('$') else {
            return false;
        };
        let Ok(salt) = hex::decode(salt_hex) else {
            return false;
        };
        let candidate = Self::derive_with_salt(&salt, password);
        // Compare digests byte-wise to avoid short-circuiting on length.
        let (a, b) = (self.0.as_bytes(), candidate.0.as_bytes());
        a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
    }

    /// Re-validate a hash loaded from persistence.
    pub fn parse(stored: impl Into<String>) -> Result<Self, PasswordHashParseError> {
        let stored = stored.into();
        let (salt_hex, digest_hex) = stored
            .split_once('$')
            .ok_or(PasswordHashParseError::MissingSeparator)?;
        if hex::decode(salt_hex).map(|s| s.len() != SALT_LEN).unwrap_or(true) {
            return Err(PasswordHashParseError::MalformedHex);
        }
        if hex::decode(digest_hex).map(|d| d.len() != 32).unwrap_or(true) {
            return Err(PasswordHashParseError::MalformedHex);
        }
        Ok(Self(stored))
    }

    /// Stored representation written to persistence.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}
