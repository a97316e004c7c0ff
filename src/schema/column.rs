use super::bindings::{self, Constraint, EngineKind, LogicalType};

/// One column's logical type plus its constraint flags.
///
/// A primary key is never nullable: [`ColumnDescriptor::new`] and
/// [`ColumnDescriptor::primary_key`] normalise `nullable` to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDescriptor {
    logical_type: LogicalType,
    nullable: bool,
    primary_key: bool,
    unique: bool,
}

impl ColumnDescriptor {
    pub fn new(logical_type: LogicalType, nullable: bool, primary_key: bool, unique: bool) -> Self {
        Self {
            logical_type,
            nullable: nullable && !primary_key,
            primary_key,
            unique,
        }
    }

    /// A nullable column without constraints.
    pub fn of(logical_type: LogicalType) -> Self {
        Self::new(logical_type, true, false, false)
    }

    pub fn integer() -> Self {
        Self::of(LogicalType::Integer)
    }

    pub fn float() -> Self {
        Self::of(LogicalType::Float)
    }

    pub fn text() -> Self {
        Self::of(LogicalType::Text)
    }

    pub fn null() -> Self {
        Self::of(LogicalType::Null)
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Setting `nullable` on a primary key column has no effect.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable && !self.primary_key;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn logical_type(&self) -> LogicalType {
        self.logical_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// Constraints in rendering order. NOT NULL is implied by PRIMARY KEY and
    /// is not emitted twice.
    pub fn constraints(&self) -> Vec<Constraint> {
        let mut out = Vec::with_capacity(3);
        if !self.primary_key && !self.nullable {
            out.push(Constraint::NotNull);
        }
        if self.primary_key {
            out.push(Constraint::PrimaryKey);
        }
        if self.unique {
            out.push(Constraint::Unique);
        }
        out
    }

    pub fn sql_type(&self, engine: EngineKind) -> &'static str {
        bindings::sql_type(engine, self.logical_type)
    }

    /// `<sql_type> <constraint> ...`, space joined.
    pub fn render(&self, engine: EngineKind) -> String {
        std::iter::once(self.sql_type(engine))
            .chain(
                self.constraints()
                    .into_iter()
                    .map(|c| bindings::constraint_keyword(engine, c)),
            )
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQLITE: EngineKind = EngineKind::Sqlite;

    #[test]
    fn renders_bare_type() {
        assert_eq!(ColumnDescriptor::float().render(SQLITE), "REAL");
    }

    #[test]
    fn renders_constraints_in_fixed_order() {
        let email = ColumnDescriptor::text().unique().not_null();
        assert_eq!(email.render(SQLITE), "TEXT NOT NULL UNIQUE");
    }

    #[test]
    fn primary_key_does_not_emit_not_null() {
        let id = ColumnDescriptor::integer().primary_key();
        assert_eq!(id.render(SQLITE), "INTEGER PRIMARY KEY");
        assert_eq!(
            ColumnDescriptor::integer().primary_key().unique().render(SQLITE),
            "INTEGER PRIMARY KEY UNIQUE"
        );
    }

    #[test]
    fn primary_key_wins_over_nullable() {
        let id = ColumnDescriptor::new(LogicalType::Integer, true, true, false);
        assert!(!id.is_nullable());
        assert!(!ColumnDescriptor::integer().primary_key().nullable(true).is_nullable());
    }
}
