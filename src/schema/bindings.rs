//! Bindings between logical column types / constraints and the keywords each
//! storage engine spells them with.
//!
//! Adding an engine means adding an [`EngineKind`] variant; the compiler then
//! points at every match arm below that needs a keyword for it.

use std::fmt;
use std::str::FromStr;

use crate::error::VaultError;

/// Storage backends with a binding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EngineKind {
    #[default]
    Sqlite,
}

impl EngineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(EngineKind::Sqlite),
            _ => Err(VaultError::UnknownEngine(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Integer,
    Float,
    Text,
    Null,
}

/// Column constraints, listed in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    NotNull,
    PrimaryKey,
    Unique,
}

pub fn sql_type(engine: EngineKind, ty: LogicalType) -> &'static str {
    match (engine, ty) {
        (EngineKind::Sqlite, LogicalType::Integer) => "INTEGER",
        (EngineKind::Sqlite, LogicalType::Float) => "REAL",
        (EngineKind::Sqlite, LogicalType::Text) => "TEXT",
        (EngineKind::Sqlite, LogicalType::Null) => "NULL",
    }
}

pub fn constraint_keyword(engine: EngineKind, constraint: Constraint) -> &'static str {
    match (engine, constraint) {
        (EngineKind::Sqlite, Constraint::NotNull) => "NOT NULL",
        (EngineKind::Sqlite, Constraint::PrimaryKey) => "PRIMARY KEY",
        (EngineKind::Sqlite, Constraint::Unique) => "UNIQUE",
    }
}

/// Reverse of [`sql_type`]: maps a keyword reported by the engine back to a
/// logical type. Used when decoding result rows.
pub fn logical_type_for(engine: EngineKind, keyword: &str) -> Result<LogicalType, VaultError> {
    [
        LogicalType::Integer,
        LogicalType::Float,
        LogicalType::Text,
        LogicalType::Null,
    ]
    .into_iter()
    .find(|ty| sql_type(engine, *ty).eq_ignore_ascii_case(keyword))
    .ok_or_else(|| VaultError::UnknownType {
        engine,
        keyword: keyword.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_engine_aliases() {
        assert_eq!("sqlite".parse::<EngineKind>().unwrap(), EngineKind::Sqlite);
        assert_eq!("SQLite3".parse::<EngineKind>().unwrap(), EngineKind::Sqlite);
        assert!(matches!(
            "postgres".parse::<EngineKind>(),
            Err(VaultError::UnknownEngine(name)) if name == "postgres"
        ));
    }

    #[test]
    fn sqlite_keywords() {
        assert_eq!(sql_type(EngineKind::Sqlite, LogicalType::Float), "REAL");
        assert_eq!(
            constraint_keyword(EngineKind::Sqlite, Constraint::PrimaryKey),
            "PRIMARY KEY"
        );
    }

    #[test]
    fn reverse_lookup() {
        assert_eq!(
            logical_type_for(EngineKind::Sqlite, "integer").unwrap(),
            LogicalType::Integer
        );
        assert!(matches!(
            logical_type_for(EngineKind::Sqlite, "BLOB"),
            Err(VaultError::UnknownType { .. })
        ));
    }
}
