//! Declarative table descriptions.
//!
//! Layout:
//! - `bindings.rs`: logical types / constraints and their per-engine keywords
//! - `column.rs`: one column's type plus constraint flags
//! - `table.rs`: ordered columns of one table
//! - `registry.rs`: the process-wide set of declared tables
//! - `value.rs`: runtime values and ordered records

pub mod bindings;
pub mod column;
pub mod registry;
pub mod table;
pub mod value;

pub use bindings::{Constraint, EngineKind, LogicalType};
pub use column::ColumnDescriptor;
pub use registry::SchemaRegistry;
pub use table::{TableSchema, TableSchemaBuilder};
pub use value::{Record, Value};
