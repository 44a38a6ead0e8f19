//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Email uniqueness is enforced by the `users_email_key` index; a violation
//! is reported as [`UserRepositoryError::DuplicateEmail`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{EmailAddress, User, UserId};

use super::diesel_error_mapping::{
    map_diesel_error, map_pool_error, violated_unique_constraint, with_deadline,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserRepositoryError {
    map_pool_error(error)
}

fn diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_diesel_error(error)
}

fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    User::try_from(row).map_err(UserRepositoryError::query)
}

fn map_insert_error(error: diesel::result::Error, email: &str) -> UserRepositoryError {
    if violated_unique_constraint(&error) == Some(EMAIL_UNIQUE_CONSTRAINT) {
        return UserRepositoryError::duplicate_email(email);
    }
    map_diesel_error(error)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        with_deadline(self.pool.call_timeout(), "insert", async {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            diesel::insert_into(users::table)
                .values(NewUserRow::from(user))
                .execute(&mut conn)
                .await
                .map(|_| ())
                .map_err(|err| map_insert_error(err, user.email().as_ref()))
        })
        .await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        with_deadline(self.pool.call_timeout(), "find_by_id", async {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            let row: Option<UserRow> = users::table
                .filter(users::id.eq(id.as_uuid()))
                .select(UserRow::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map_err(diesel_error)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        with_deadline(self.pool.call_timeout(), "find_by_email", async {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            let row: Option<UserRow> = users::table
                .filter(users::email.eq(email.as_ref()))
                .select(UserRow::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map_err(diesel_error)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserRepositoryError> {
        with_deadline(self.pool.call_timeout(), "exists_by_email", async {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            diesel::select(diesel::dsl::exists(
                users::table.filter(users::email.eq(email.as_ref())),
            ))
            .get_result::<bool>(&mut conn)
            .await
            .map_err(diesel_error)
        })
        .await
    }
}
