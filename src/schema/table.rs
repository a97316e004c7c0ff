use super::column::ColumnDescriptor;
use crate::error::VaultError;

/// A table name plus its columns in declaration order.
///
/// Declaration order is the order of CREATE TABLE and of INSERT's column list.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    name: String,
    columns: Vec<(String, ColumnDescriptor)>,
}

impl TableSchema {
    /// Fails on an empty column list, a repeated column name, or more than one
    /// primary key.
    pub fn new<N, I>(name: impl Into<String>, columns: I) -> Result<Self, VaultError>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, ColumnDescriptor)>,
    {
        let name = name.into();
        let mut out: Vec<(String, ColumnDescriptor)> = Vec::new();
        for (column, descriptor) in columns {
            let column = column.into();
            if out.iter().any(|(existing, _)| *existing == column) {
                return Err(VaultError::DuplicateColumn { table: name, column });
            }
            out.push((column, descriptor));
        }
        if out.is_empty() {
            return Err(VaultError::EmptyTable(name));
        }

        let keys: Vec<String> = out
            .iter()
            .filter(|(_, d)| d.is_primary_key())
            .map(|(c, _)| c.clone())
            .collect();
        if keys.len() > 1 {
            return Err(VaultError::MultiplePrimaryKeys {
                table: name,
                columns: keys,
            });
        }

        Ok(Self { name, columns: out })
    }

    pub fn builder(name: impl Into<String>) -> TableSchemaBuilder {
        TableSchemaBuilder {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &ColumnDescriptor)> {
        self.columns.iter().map(|(name, d)| (name.as_str(), d))
    }

    pub fn column(&self, column: &str) -> Result<&ColumnDescriptor, VaultError> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, d)| d)
            .ok_or_else(|| VaultError::ColumnNotFound {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|(name, _)| name == column)
    }

    pub fn primary_key_column(&self) -> Option<&str> {
        self.columns
            .iter()
            .find(|(_, d)| d.is_primary_key())
            .map(|(name, _)| name.as_str())
    }
}

/// Collects columns in call order; checks happen in [`TableSchemaBuilder::build`].
#[derive(Debug, Clone)]
pub struct TableSchemaBuilder {
    name: String,
    columns: Vec<(String, ColumnDescriptor)>,
}

impl TableSchemaBuilder {
    pub fn column(mut self, name: impl Into<String>, descriptor: ColumnDescriptor) -> Self {
        self.columns.push((name.into(), descriptor));
        self
    }

    pub fn build(self) -> Result<TableSchema, VaultError> {
        TableSchema::new(self.name, self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> TableSchema {
        TableSchema::builder("users")
            .column("user_id", ColumnDescriptor::integer().primary_key())
            .column("name", ColumnDescriptor::text().not_null())
            .column("email", ColumnDescriptor::text().not_null().unique())
            .build()
            .unwrap()
    }

    #[test]
    fn keeps_declaration_order() {
        let schema = users();
        let names: Vec<_> = schema.columns().map(|(n, _)| n).collect();
        assert_eq!(names, ["user_id", "name", "email"]);
        assert_eq!(schema.primary_key_column(), Some("user_id"));
    }

    #[test]
    fn column_lookup_reports_missing() {
        let schema = users();
        assert!(schema.column("email").unwrap().is_unique());
        assert!(matches!(
            schema.column("phone"),
            Err(VaultError::ColumnNotFound { column, .. }) if column == "phone"
        ));
    }

    #[test]
    fn rejects_duplicate_column() {
        let err = TableSchema::builder("t")
            .column("a", ColumnDescriptor::text())
            .column("a", ColumnDescriptor::integer())
            .build()
            .unwrap_err();
        assert!(matches!(err, VaultError::DuplicateColumn { column, .. } if column == "a"));
    }

    #[test]
    fn rejects_second_primary_key() {
        let err = TableSchema::new(
            "t",
            [
                ("a", ColumnDescriptor::integer().primary_key()),
                ("b", ColumnDescriptor::integer().primary_key()),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, VaultError::MultiplePrimaryKeys { columns, .. } if columns == ["a", "b"]));
    }

    #[test]
    fn rejects_table_without_columns() {
        let err = TableSchema::builder("t").build().unwrap_err();
        assert!(matches!(err, VaultError::EmptyTable(name) if name == "t"));
    }

    #[test]
    fn table_without_primary_key() {
        let schema = TableSchema::new("t", [("a", ColumnDescriptor::text())]).unwrap();
        assert_eq!(schema.primary_key_column(), None);
    }
}
