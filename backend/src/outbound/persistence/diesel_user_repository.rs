//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{SeedingResult, UserPersistenceError, UserRepository};
use crate::domain::{User, UserId};

use super::diesel_error_mapping::{DieselErrorMapping, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use paintapp::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/paintapp")).await?;
    /// let repository = DieselUserRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_user_pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

fn map_user_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        DieselErrorMapping {
            query: UserPersistenceError::query,
            connection: UserPersistenceError::connection,
            conflict: UserPersistenceError::conflict,
        },
    )
}

/// Convert a database row into a validated domain user.
pub(super) fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow {
        id,
        username,
        display_name,
    } = row;
    User::try_from_parts(id, username, display_name)
        .map_err(|err| UserPersistenceError::query(format!("stored user {id} is invalid: {err}")))
}

fn user_to_row(user: &User) -> NewUserRow<'_> {
    NewUserRow {
        id: user.id().as_i64(),
        username: user.username().as_ref(),
        display_name: user.display_name().as_ref(),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_user_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;

        let row = users::table
            .find(id.as_i64())
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_user_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn insert_if_empty(
        &self,
        seed_users: &[User],
    ) -> Result<SeedingResult, UserPersistenceError> {
        let rows: Vec<NewUserRow<'_>> = seed_users.iter().map(user_to_row).collect();
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                // Concurrent seeders block here until the first one commits.
                diesel::sql_query("LOCK TABLE users IN SHARE ROW EXCLUSIVE MODE")
                    .execute(conn)
                    .await?;

                let existing: i64 = users::table.count().get_result(conn).await?;
                if existing > 0 {
                    return Ok(SeedingResult::AlreadySeeded);
                }

                if !rows.is_empty() {
                    diesel::insert_into(users::table)
                        .values(&rows)
                        .execute(conn)
                        .await?;
                }
                Ok(SeedingResult::Applied)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_user_diesel_error)
    }
}
