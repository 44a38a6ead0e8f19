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
    /// Registered accounts.
    ///
    /// `email` carries the `users_email_key` unique index.
    users (id) {
        id -> Uuid,
        first_name -> Text,
        last_name -> Text,
        email -> Text,
        phone -> Nullable<Text>,
        password_hash -> Text,
        /// `user` or `admin`, enforced by a check constraint.
        role -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Housing listings. Attribute columns hold free-form agent input.
    listings (id) {
        id -> Uuid,
        kind -> Text,
        name -> Text,
        image -> Text,
        county -> Text,
        address -> Text,
        bedrooms -> Text,
        bathrooms -> Text,
        surface -> Text,
        year -> Text,
        price -> Text,
        latitude -> Float8,
        longitude -> Float8,
        agent_name -> Text,
        agent_phone -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Viewing requests.
    ///
    /// `listing_id` has no foreign key so requests survive listing deletion.
    /// At most one `pending` row may exist per `(user_id, listing_id)`.
    property_requests (id) {
        id -> Uuid,
        user_id -> Uuid,
        listing_id -> Uuid,
        status -> Text,
        message -> Nullable<Text>,
        processed_by -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(property_requests -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, listings, property_requests);
