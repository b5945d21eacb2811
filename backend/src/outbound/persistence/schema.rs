//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Registered users.
    ///
    /// The `id` column is the primary key, generated by the database.
    users (id) {
        /// Primary key: UUID generated with `gen_random_uuid()`.
        id -> Uuid,
        /// Unique email address.
        email -> Text,
        /// Optional display name.
        name -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp, written by the adapter.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Blog posts, each owned by a user.
    posts (id) {
        /// Primary key: UUID generated with `gen_random_uuid()`.
        id -> Uuid,
        /// Title (max 200 characters).
        title -> Varchar,
        /// Optional body text.
        content -> Nullable<Text>,
        /// Publication flag, false on insert.
        published -> Bool,
        /// Author reference; deletion of the user is restricted.
        author_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp, written by the adapter.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(posts -> users (author_id));
diesel::allow_tables_to_appear_in_same_query!(posts, users);
