//! Internal Diesel row structs.
//!
//! These types are implementation details of the persistence layer and never
//! cross into the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{paintings, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub display_name: String,
}

/// Insertable struct for seeding user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: i64,
    pub username: &'a str,
    pub display_name: &'a str,
}

/// Row struct for reading from the paintings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = paintings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PaintingRow {
    pub id: i64,
    pub title: String,
    pub shapes_data: String,
    pub created_at: DateTime<Utc>,
    pub user_id: i64,
}

/// Insertable struct for new paintings; the id comes from `BIGSERIAL`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = paintings)]
pub(crate) struct NewPaintingRow<'a> {
    pub title: &'a str,
    pub shapes_data: &'a str,
    pub created_at: DateTime<Utc>,
    pub user_id: i64,
}
