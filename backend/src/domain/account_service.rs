//! Account registration and authentication use-cases.

use std::sync::Arc;

use tracing::info;

use super::account::{Account, UserId};
use super::auth::{Credentials, PasswordHash};
use super::error::Error;
use super::ports::{AccountPersistenceError, AccountRepository};

/// Use-case service over an [`AccountRepository`].
///
/// Passwords are salted-hashed here so no port ever sees a plaintext
/// credential.
#[derive(Clone)]
pub struct AccountService {
    repository: Arc<dyn AccountRepository>,
}

fn map_persistence_error(error: AccountPersistenceError) -> Error {
    match error {
        AccountPersistenceError::DuplicateUsername => {
            Error::conflict("username is already registered")
        }
        AccountPersistenceError::Connection { message }
        | AccountPersistenceError::Query { message } => Error::internal(message),
    }
}

impl AccountService {
    /// Create a new service backed by the given repository.
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self { repository }
    }

    /// Register a new account and return its identifier.
    ///
    /// The unique username index is the arbiter: a duplicate surfaces as
    /// [`crate::domain::ErrorCode::Conflict`] even when two registrations
    /// race.
    pub async fn register(&self, credentials: &Credentials) -> Result<UserId, Error> {
        let account = Account::new(
            UserId::random(),
            credentials.username().clone(),
            PasswordHash::derive(credentials.password()),
        );

        self.repository
            .insert(&account)
            .await
            .map_err(map_persistence_error)?;

        info!(user_id = %account.id(), username = %account.username(), "account registered");
        Ok(*account.id())
    }

    /// Validate credentials and return the authenticated user id.
    ///
    /// Unknown usernames and wrong passwords produce the same error so the
    /// response does not reveal which usernames exist.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<UserId, Error> {
        let account = self
            .repository
            .find_by_username(credentials.username())
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::unauthorized("invalid username or password"))?;

        if !account.password_hash().verify(credentials.password()) {
            return Err(Error::unauthorized("invalid username or password"));
        }

        Ok(*account.id())
    }

    /// Fetch the account behind an authenticated session, if it still exists.
    pub async fn find(&self, id: &UserId) -> Result<Option<Account>, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)
    }
}
