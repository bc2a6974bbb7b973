//! PostgreSQL-backed `AccountRepository` implementation using Diesel ORM.
//!
//! The unique index on `users.username` is the source of truth for duplicate
//! registrations; a unique violation surfaces as
//! [`AccountPersistenceError::DuplicateUsername`] so two concurrent
//! registrations cannot both succeed.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AccountPersistenceError, AccountRepository};
use crate::domain::{Account, PasswordHash, UserId, Username};

use super::diesel_helpers::diesel_error_message;
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the `AccountRepository` port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_account(row: UserRow) -> Result<Account, AccountPersistenceError> {
    let username = Username::new(row.username)
        .map_err(|err| AccountPersistenceError::query(format!("stored username invalid: {err}")))?;
    let hash = PasswordHash::parse(row.password_hash).map_err(|err| {
        AccountPersistenceError::query(format!("stored password hash invalid: {err}"))
    })?;
    Ok(Account::new(UserId::from_uuid(row.id), username, hash))
}

fn map_insert_error(error: diesel::result::Error) -> AccountPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            AccountPersistenceError::DuplicateUsername
        }
        other => AccountPersistenceError::query(diesel_error_message(&other, "insert account")),
    }
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn insert(&self, account: &Account) -> Result<(), AccountPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| AccountPersistenceError::connection(err.message()))?;

        let row = NewUserRow {
            id: *account.id().as_uuid(),
            username: account.username().as_ref(),
            password_hash: account.password_hash().as_str(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_insert_error)?;
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| AccountPersistenceError::connection(err.message()))?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| {
                AccountPersistenceError::query(diesel_error_message(&err, "find account by name"))
            })?;

        row.map(row_to_account).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, AccountPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| AccountPersistenceError::connection(err.message()))?;

        let row: Option<UserRow> = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| {
                AccountPersistenceError::query(diesel_error_message(&err, "find account by id"))
            })?;

        row.map(row_to_account).transpose()
    }
}
