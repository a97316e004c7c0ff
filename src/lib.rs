pub mod config;
pub mod db;
pub mod error;
pub mod schema;
pub mod service;
pub mod sql;

pub use error::VaultError;
pub use schema::{ColumnDescriptor, EngineKind, LogicalType, Record, SchemaRegistry, TableSchema, Value};
pub use service::Store;
pub use sql::{Rejection, Statement, StatementBuilder, WhereJoiner};
