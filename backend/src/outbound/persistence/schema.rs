//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. When a
//! migration changes the schema, update this file to match (or regenerate it
//! with `diesel print-schema`).

diesel::table! {
    /// Registered user accounts.
    ///
    /// Passwords are never stored; each row holds an HMAC-SHA-512 digest and
    /// the per-user random key (`password_salt`) it was computed under.
    users (id) {
        /// Primary key, assigned by the database sequence.
        id -> Int4,
        /// Login name, unique case-insensitively.
        username -> Text,
        /// HMAC-SHA-512 digest of the password (64 bytes).
        password_hash -> Bytea,
        /// Random HMAC key used as the salt (64 bytes).
        password_salt -> Bytea,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Individual expense records, owned by a user.
    expenses (id) {
        /// Primary key, assigned by the database sequence.
        id -> Int4,
        /// Owning user; rows are removed with the account.
        user_id -> Int4,
        /// What the money was spent on.
        title -> Text,
        /// Amount in minor currency units.
        amount_cents -> Int8,
        /// Calendar date of the spend.
        spent_on -> Date,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(expenses -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(expenses, users);
