//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation. Regenerate
//! with `diesel print-schema` when migrations change.

diesel::table! {
    /// User accounts table.
    ///
    /// The `password` column stores the argon2 PHC hash, never plaintext.
    users (id) {
        /// Primary key: UUID v4 identifier generated at sign-up.
        id -> Uuid,
        /// Display name supplied at sign-up.
        name -> Varchar,
        /// Sign-in email, unique across accounts.
        email -> Varchar,
        /// Argon2 PHC password hash.
        password -> Varchar,
    }
}

diesel::table! {
    /// Invoice records table.
    invoices (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Reference to the billed customer.
        customer_id -> Varchar,
        /// Amount in integer cents, strictly positive.
        amount -> Int4,
        /// Payment status: `pending` or `paid`.
        status -> Varchar,
        /// Issue date.
        date -> Date,
    }
}
