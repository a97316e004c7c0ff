//! Table definitions for the credential store.
//!
//! New tables go here and into [`all`]; the registry is built from that list
//! at startup.

use crate::error::VaultError;
use crate::schema::{ColumnDescriptor, SchemaRegistry, TableSchema};

pub const USERS: &str = "users";
pub const PASSWORDS: &str = "passwords";

/// `users`: one row per account; `email` is the login name.
pub fn users() -> Result<TableSchema, VaultError> {
    TableSchema::builder(USERS)
        .column("user_id", ColumnDescriptor::integer().primary_key())
        .column("name", ColumnDescriptor::text().not_null())
        .column("email", ColumnDescriptor::text().not_null().unique())
        .column("hashed_pw", ColumnDescriptor::text().not_null())
        .build()
}

/// `passwords`: stored credentials, owned by a user through `user_id`.
pub fn passwords() -> Result<TableSchema, VaultError> {
    TableSchema::builder(PASSWORDS)
        .column("password_id", ColumnDescriptor::integer().primary_key())
        .column("app_name", ColumnDescriptor::text().not_null())
        .column("app_url", ColumnDescriptor::text().not_null())
        .column("username", ColumnDescriptor::text().not_null())
        .column("password", ColumnDescriptor::text().not_null())
        .column("user_id", ColumnDescriptor::integer().not_null())
        .build()
}

pub fn all() -> Result<SchemaRegistry, VaultError> {
    SchemaRegistry::new([users()?, passwords()?])
}
