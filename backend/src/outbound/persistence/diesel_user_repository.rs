//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRecord, UserRepository};
use crate::domain::{PasswordDigest, User, UserId, Username};

use super::diesel_error_mapping::{StoreFailure, classify};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, username: &str) -> UserPersistenceError {
    match classify(error) {
        StoreFailure::Connection(message) => UserPersistenceError::connection(message),
        StoreFailure::UniqueViolation => UserPersistenceError::duplicate_username(username),
        StoreFailure::ForeignKeyViolation => UserPersistenceError::query("constraint violation"),
        StoreFailure::Query(message) => UserPersistenceError::query(message),
    }
}

fn row_to_record(row: UserRow) -> Result<UserRecord, UserPersistenceError> {
    let username = Username::new(&row.username)
        .map_err(|err| UserPersistenceError::query(format!("stored username invalid: {err}")))?;
    Ok(UserRecord {
        user: User {
            id: UserId::new(row.id),
            username,
        },
        password: PasswordDigest::from_stored(row.password),
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(
        &self,
        username: &Username,
        password: &PasswordDigest,
    ) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            username: username.as_ref(),
            password: password.as_str(),
        };
        let stored = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, username.as_ref()))?;
        row_to_record(stored).map(|record| record.user)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, username))?;
        row.map(row_to_record).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, ""))?;
        Ok(row.map(row_to_record).transpose()?.map(|record| record.user))
    }
}
