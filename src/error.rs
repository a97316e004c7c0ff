use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

use crate::schema::bindings::EngineKind;
use crate::sql::validator::Rejection;

#[derive(Debug, ThisError)]
pub enum VaultError {
    #[error("unknown database engine: {0}")]
    UnknownEngine(String),

    #[error("{engine} has no logical type for keyword {keyword}")]
    UnknownType { engine: EngineKind, keyword: String },

    #[error("table {0} declares no columns")]
    EmptyTable(String),

    #[error("duplicate column {column} in table {table}")]
    DuplicateColumn { table: String, column: String },

    #[error("table {table} declares more than one primary key: {columns:?}")]
    MultiplePrimaryKeys { table: String, columns: Vec<String> },

    #[error("table {0} is declared twice")]
    DuplicateTable(String),

    #[error("table {0} is not declared")]
    UnknownTable(String),

    #[error("table {table} has no column {column}")]
    ColumnNotFound { table: String, column: String },

    #[error("no conditions given for a WHERE clause on {0}")]
    EmptyConditions(String),

    #[error("no columns given to SET on {0}")]
    EmptyAssignments(String),

    #[error("record rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error("failed to execute `{statement}`: {source}")]
    Execution {
        statement: String,
        #[source]
        source: SqlxError,
    },

    #[error("commit failed: {0}")]
    Commit(#[source] SqlxError),

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("cannot decode column {column}: {reason}")]
    Decode { column: String, reason: String },

    #[error("schema registry already initialized")]
    RegistryInitialized,

    #[error("schema registry not initialized")]
    RegistryUninitialized,

    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl VaultError {
    /// Validation rejections are the caller's to correct; everything else is
    /// a configuration bug or an engine failure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, VaultError::Rejected(_))
    }
}

impl From<figment::Error> for VaultError {
    fn from(e: figment::Error) -> Self {
        VaultError::Config(Box::new(e))
    }
}
