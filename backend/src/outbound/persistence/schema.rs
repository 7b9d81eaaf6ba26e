//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Seeded user identities. Ids are supplied by the seeder, never generated.
    users (id) {
        id -> Int8,
        /// Unique login-style handle.
        username -> Varchar,
        display_name -> Varchar,
    }
}

diesel::table! {
    /// Latest painting per user; `user_id` carries a unique constraint.
    paintings (id) {
        id -> Int8,
        title -> Text,
        /// Opaque client-serialised shape payload.
        shapes_data -> Text,
        created_at -> Timestamptz,
        user_id -> Int8,
    }
}

diesel::joinable!(paintings -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(paintings, users);
