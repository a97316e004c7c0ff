//! Storage side: the connection contract, its SQLite implementation, and the
//! application's table definitions.
//!
//! Layout:
//! - `sqlite.rs`: sqlx-backed [`Connection`] for SQLite
//! - `schema.rs`: static table definitions (`users`, `passwords`)
//! - `models.rs`: Rust structs mirroring rows of those tables

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{PasswordEntry, User};
pub use sqlite::SqliteAdapter;

use crate::error::VaultError;
use crate::schema::value::{Record, Value};

/// What the core needs from a live engine handle.
///
/// Retries and reconnection are the implementor's business.
#[allow(async_fn_in_trait)]
pub trait Connection {
    /// Run one statement with its positional parameters and return any rows.
    /// Engine rejections surface as [`VaultError::Execution`].
    async fn execute(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Record>, VaultError>;

    /// Make everything executed so far durable. Fails with [`VaultError::Commit`].
    async fn commit(&mut self) -> Result<(), VaultError>;
}
