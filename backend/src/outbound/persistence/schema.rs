//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Int8,
        /// Unique login name (max 150 characters).
        username -> Varchar,
        /// Salted digest in `sha256$<salt>$<hex>` form.
        password -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Private notes.
    notes (id) {
        id -> Int8,
        title -> Varchar,
        text -> Text,
        /// Unique URL-safe identifier.
        slug -> Varchar,
        author_id -> Int8,
    }
}

diesel::table! {
    /// Public news items.
    news (id) {
        id -> Int8,
        title -> Varchar,
        text -> Text,
        date -> Date,
    }
}

diesel::table! {
    /// Comments on news items.
    comments (id) {
        id -> Int8,
        news_id -> Int8,
        author_id -> Int8,
        text -> Text,
        created -> Timestamptz,
    }
}

diesel::joinable!(notes -> users (author_id));
diesel::joinable!(comments -> news (news_id));
diesel::joinable!(comments -> users (author_id));

diesel::allow_tables_to_appear_in_same_query!(users, notes, news, comments);
