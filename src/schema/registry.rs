//! The set of declared tables.
//!
//! Built once from static definitions at startup and installed with [`init`];
//! read-only afterwards, so lookups need no locking.

use std::sync::OnceLock;

use super::table::TableSchema;
use crate::error::VaultError;

static REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();

#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    tables: Vec<TableSchema>,
}

impl SchemaRegistry {
    pub fn new(tables: impl IntoIterator<Item = TableSchema>) -> Result<Self, VaultError> {
        let mut out: Vec<TableSchema> = Vec::new();
        for table in tables {
            if out.iter().any(|t| t.name() == table.name()) {
                return Err(VaultError::DuplicateTable(table.name().to_string()));
            }
            out.push(table);
        }
        Ok(Self { tables: out })
    }

    pub fn get(&self, table: &str) -> Result<&TableSchema, VaultError> {
        self.tables
            .iter()
            .find(|t| t.name() == table)
            .ok_or_else(|| VaultError::UnknownTable(table.to_string()))
    }

    /// Tables in registration order.
    pub fn tables(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Install the process-wide registry. Only the first call succeeds.
pub fn init(registry: SchemaRegistry) -> Result<&'static SchemaRegistry, VaultError> {
    REGISTRY
        .set(registry)
        .map_err(|_| VaultError::RegistryInitialized)?;
    global()
}

pub fn global() -> Result<&'static SchemaRegistry, VaultError> {
    REGISTRY.get().ok_or(VaultError::RegistryUninitialized)
}
