//! PostgreSQL-backed `PaintingRepository` implementation using Diesel ORM.
//!
//! Replacement runs in one transaction: the owning user row is locked with
//! `SELECT ... FOR UPDATE`, the previous painting is deleted and the new one
//! inserted. Concurrent saves for the same user therefore queue on the lock,
//! and the unique index on `paintings.user_id` rejects anything that slips
//! past it. Saving for a missing owner fails the foreign key and surfaces as
//! a conflict.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{PaintingPersistenceError, PaintingRepository};
use crate::domain::{NewPainting, Painting, PaintingId, ShapesData, User, UserId};

use super::diesel_error_mapping::{DieselErrorMapping, map_diesel_error, map_pool_error};
use super::diesel_user_repository::row_to_user;
use super::models::{NewPaintingRow, PaintingRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{paintings, users};

/// Diesel-backed implementation of the painting repository port.
#[derive(Clone)]
pub struct DieselPaintingRepository {
    pool: DbPool,
}

impl DieselPaintingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_painting_pool_error(error: PoolError) -> PaintingPersistenceError {
    map_pool_error(error, PaintingPersistenceError::connection)
}

fn map_painting_diesel_error(error: diesel::result::Error) -> PaintingPersistenceError {
    map_diesel_error(
        error,
        DieselErrorMapping {
            query: PaintingPersistenceError::query,
            connection: PaintingPersistenceError::connection,
            conflict: PaintingPersistenceError::conflict,
        },
    )
}

/// Assemble a domain painting from its row and already-resolved owner.
fn row_to_painting(row: PaintingRow, user: User) -> Result<Painting, PaintingPersistenceError> {
    if row.user_id != user.id().as_i64() {
        return Err(PaintingPersistenceError::query(format!(
            "painting {} belongs to user {}, not {}",
            row.id,
            row.user_id,
            user.id()
        )));
    }
    let PaintingRow {
        id,
        title,
        shapes_data,
        created_at,
        user_id: _,
    } = row;
    Ok(NewPainting {
        user,
        title,
        shapes_data: ShapesData::from(shapes_data),
        created_at,
    }
    .into_painting(PaintingId::new(id)))
}

fn joined_to_painting(
    (painting, owner): (PaintingRow, UserRow),
) -> Result<Painting, PaintingPersistenceError> {
    let user = row_to_user(owner).map_err(|err| PaintingPersistenceError::query(err.to_string()))?;
    row_to_painting(painting, user)
}

/// Lock the owner row so replacements for one user run one at a time.
///
/// A missing owner is left for the `user_id` foreign key to reject.
async fn lock_owner(conn: &mut AsyncPgConnection, user_id: i64) -> QueryResult<Option<i64>> {
    users::table
        .find(user_id)
        .select(users::id)
        .for_update()
        .get_result(conn)
        .await
        .optional()
}

/// Delete the owner's current painting, returning how many rows went.
async fn delete_for_user(conn: &mut AsyncPgConnection, user_id: i64) -> QueryResult<usize> {
    diesel::delete(paintings::table.filter(paintings::user_id.eq(user_id)))
        .execute(conn)
        .await
}

/// Insert a painting row and return it with its generated id.
async fn insert_painting(
    conn: &mut AsyncPgConnection,
    row: &NewPaintingRow<'_>,
) -> QueryResult<PaintingRow> {
    diesel::insert_into(paintings::table)
        .values(row)
        .returning(PaintingRow::as_returning())
        .get_result(conn)
        .await
}

#[async_trait]
impl PaintingRepository for DieselPaintingRepository {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Painting>, PaintingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_painting_pool_error)?;

        let row = paintings::table
            .inner_join(users::table)
            .filter(paintings::user_id.eq(user_id.as_i64()))
            .select((PaintingRow::as_select(), UserRow::as_select()))
            .first::<(PaintingRow, UserRow)>(&mut conn)
            .await
            .optional()
            .map_err(map_painting_diesel_error)?;

        row.map(joined_to_painting).transpose()
    }

    async fn find_by_id(
        &self,
        id: &PaintingId,
    ) -> Result<Option<Painting>, PaintingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_painting_pool_error)?;

        let row = paintings::table
            .inner_join(users::table)
            .filter(paintings::id.eq(id.as_i64()))
            .select((PaintingRow::as_select(), UserRow::as_select()))
            .first::<(PaintingRow, UserRow)>(&mut conn)
            .await
            .optional()
            .map_err(map_painting_diesel_error)?;

        row.map(joined_to_painting).transpose()
    }

    async fn replace_for_user(
        &self,
        painting: NewPainting,
    ) -> Result<Painting, PaintingPersistenceError> {
        let NewPainting {
            user,
            title,
            shapes_data,
            created_at,
        } = painting;
        let user_id = user.id().as_i64();
        let mut conn = self.pool.get().await.map_err(map_painting_pool_error)?;

        let row = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    lock_owner(conn, user_id).await?;
                    let replaced = delete_for_user(conn, user_id).await?;
                    tracing::debug!(user_id, replaced, "cleared previous painting");
                    insert_painting(
                        conn,
                        &NewPaintingRow {
                            title: &title,
                            shapes_data: shapes_data.as_str(),
                            created_at,
                            user_id,
                        },
                    )
                    .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_painting_diesel_error)?;

        row_to_painting(row, user)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    use super::*;

    fn owner() -> User {
        User::try_from_parts(1, "default1", "User1").expect("valid user")
    }

    fn row(user_id: i64) -> PaintingRow {
        PaintingRow {
            id: 10,
            title: "Harbour".to_owned(),
            shapes_data: "[]".to_owned(),
            created_at: Utc
                .with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
                .single()
                .expect("valid timestamp"),
            user_id,
        }
    }

    #[rstest]
    fn row_with_matching_owner_converts() {
        let painting = row_to_painting(row(1), owner()).expect("matching owner");

        assert_eq!(painting.id(), PaintingId::new(10));
        assert_eq!(painting.title(), "Harbour");
        assert_eq!(painting.user(), &owner());
    }

    #[rstest]
    fn row_with_foreign_owner_is_rejected() {
        let err = row_to_painting(row(2), owner()).expect_err("owner mismatch");
        assert!(matches!(err, PaintingPersistenceError::Query { .. }));
    }

    #[rstest]
    fn joined_row_with_invalid_owner_is_a_query_error() {
        let owner_row = UserRow {
            id: 1,
            username: String::new(),
            display_name: "User1".to_owned(),
        };
        let err = joined_to_painting((row(1), owner_row)).expect_err("invalid owner");
        assert!(matches!(err, PaintingPersistenceError::Query { .. }));
    }
}
