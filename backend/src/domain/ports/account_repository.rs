//! Port abstraction for account persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Account, UserId, Username};

/// Persistence errors raised by account repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountPersistenceError {
    /// Repository connection could not be established.
    #[error("account repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("account repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
    /// The username is already registered.
    #[error("username is already registered")]
    DuplicateUsername,
}

impl AccountPersistenceError {
    /// Connection failure with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Query failure with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Storage port for registered accounts.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// Returns [`AccountPersistenceError::DuplicateUsername`] when the
    /// username is taken; the unique index is the source of truth so two
    /// concurrent registrations cannot both succeed.
    async fn insert(&self, account: &Account) -> Result<(), AccountPersistenceError>;

    /// Fetch an account by its unique username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountPersistenceError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, AccountPersistenceError>;
}
