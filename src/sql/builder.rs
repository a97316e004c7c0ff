//! Renders SQL text from a [`TableSchema`].
//!
//! Output is byte-stable: the layout below (tabs, line breaks, `, ` joins) is
//! what downstream callers and the test suite compare against. Values are
//! never interpolated; every value becomes a positional `?` and is returned
//! alongside the text in placeholder order.

use serde::{Deserialize, Serialize};

use crate::error::VaultError;
use crate::schema::bindings::EngineKind;
use crate::schema::table::TableSchema;
use crate::schema::value::{Record, Value};

const PLACEHOLDER: &str = "?";

/// How multiple WHERE predicates are joined.
///
/// `Comma` reproduces the historical output (`a = ?, \n\tb = ?`), which SQL
/// engines do not accept as a conjunction. `And` emits a valid conjunction.
/// The default stays `Comma` until callers relying on the old text are gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhereJoiner {
    #[default]
    Comma,
    And,
}

impl WhereJoiner {
    fn separator(&self) -> &'static str {
        match self {
            WhereJoiner::Comma => ", \n\t",
            WhereJoiner::And => " \n\tAND ",
        }
    }
}

/// Rendered SQL text plus the values bound to its placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Statement {
    fn text(sql: String) -> Self {
        Self {
            sql,
            params: Vec::new(),
        }
    }

    pub fn placeholder_count(&self) -> usize {
        self.sql.matches(PLACEHOLDER).count()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatementBuilder {
    engine: EngineKind,
    joiner: WhereJoiner,
}

impl StatementBuilder {
    pub fn new(engine: EngineKind) -> Self {
        Self {
            engine,
            joiner: WhereJoiner::default(),
        }
    }

    pub fn with_joiner(mut self, joiner: WhereJoiner) -> Self {
        self.joiner = joiner;
        self
    }

    pub fn create_table(&self, schema: &TableSchema) -> String {
        let columns = schema
            .columns()
            .map(|(name, d)| format!("{name} {}", d.render(self.engine)))
            .collect::<Vec<_>>()
            .join(", \n\t");
        format!("CREATE TABLE IF NOT EXISTS {} (\n\t{columns});", schema.name())
    }

    /// Keys outside the schema and the primary key column are dropped
    /// silently; the remaining columns keep the record's order.
    pub fn insert(&self, schema: &TableSchema, record: &Record) -> Statement {
        let pk = schema.primary_key_column();
        let (columns, params): (Vec<&str>, Vec<Value>) = record
            .iter()
            .filter(|(name, _)| schema.has_column(name) && Some(*name) != pk)
            .map(|(name, value)| (name, value.clone()))
            .unzip();

        if columns.is_empty() {
            return Statement::text(format!("INSERT INTO {} \nDEFAULT VALUES;", schema.name()));
        }

        let placeholders = vec![PLACEHOLDER; columns.len()].join(", ");
        Statement {
            sql: format!(
                "INSERT INTO {} \n({}) \nVALUES ({placeholders});",
                schema.name(),
                columns.join(", ")
            ),
            params,
        }
    }

    pub fn select_all(&self, schema: &TableSchema) -> Statement {
        Statement::text(format!("SELECT * FROM {};", schema.name()))
    }

    pub fn select_where(
        &self,
        schema: &TableSchema,
        conditions: &Record,
    ) -> Result<Statement, VaultError> {
        let (predicates, params) = self.where_clause(schema, conditions)?;
        Ok(Statement {
            sql: format!("SELECT * FROM {} \n\tWHERE {predicates};", schema.name()),
            params,
        })
    }

    /// SET values come first in `params`, then the WHERE values.
    pub fn update_where(
        &self,
        schema: &TableSchema,
        conditions: &Record,
        data: &Record,
    ) -> Result<Statement, VaultError> {
        if data.is_empty() {
            return Err(VaultError::EmptyAssignments(schema.name().to_string()));
        }
        let (assignments, mut params) = assignments(schema, data, ", \n\t")?;
        let (predicates, where_params) = self.where_clause(schema, conditions)?;
        params.extend(where_params);
        Ok(Statement {
            sql: format!(
                "UPDATE {} \nSET {assignments} \nWHERE {predicates};",
                schema.name()
            ),
            params,
        })
    }

    pub fn delete_where(
        &self,
        schema: &TableSchema,
        conditions: &Record,
    ) -> Result<Statement, VaultError> {
        let (predicates, params) = self.where_clause(schema, conditions)?;
        Ok(Statement {
            sql: format!("DELETE FROM {} \nWHERE {predicates};", schema.name()),
            params,
        })
    }

    fn where_clause(
        &self,
        schema: &TableSchema,
        conditions: &Record,
    ) -> Result<(String, Vec<Value>), VaultError> {
        if conditions.is_empty() {
            return Err(VaultError::EmptyConditions(schema.name().to_string()));
        }
        assignments(schema, conditions, self.joiner.separator())
    }
}

/// `<col> = ?` for every entry, joined by `separator`.
fn assignments(
    schema: &TableSchema,
    record: &Record,
    separator: &str,
) -> Result<(String, Vec<Value>), VaultError> {
    let mut parts = Vec::with_capacity(record.len());
    let mut params = Vec::with_capacity(record.len());
    for (name, value) in record.iter() {
        schema.column(name)?;
        parts.push(format!("{name} = {PLACEHOLDER}"));
        params.push(value.clone());
    }
    Ok((parts.join(separator), params))
}
