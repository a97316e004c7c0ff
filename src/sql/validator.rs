//! Checks a record against a [`TableSchema`] before it may be written.
//!
//! Checks run in a fixed order and stop at the first failure: key membership,
//! then type conformance, then completeness. Uniqueness is left to the engine,
//! which is the only party that can see existing rows.

use thiserror::Error as ThisError;

use crate::schema::bindings::LogicalType;
use crate::schema::column::ColumnDescriptor;
use crate::schema::table::TableSchema;
use crate::schema::value::{Record, Value};

/// Why a record was turned away. Recoverable: the caller may correct the
/// record and try again.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Rejection {
    #[error("{table} has no column {column}")]
    UnknownColumn { table: String, column: String },

    #[error("{table}.{column} expects {expected:?}, got {found:?}")]
    TypeMismatch {
        table: String,
        column: String,
        expected: LogicalType,
        found: LogicalType,
    },

    #[error("{table}.{column} is the primary key and must not be supplied")]
    PrimaryKeySupplied { table: String, column: String },

    #[error("{table}.{column} is required")]
    MissingRequiredColumn { table: String, column: String },

    #[error("{table}.{column} = NULL never matches a row")]
    NullCondition { table: String, column: String },
}

/// Full check for an INSERT payload.
pub fn validate(schema: &TableSchema, record: &Record) -> Result<(), Rejection> {
    check_members(schema, record)?;
    check_types(schema, record)?;

    for (column, descriptor) in schema.columns() {
        if descriptor.is_primary_key() {
            if record.contains(column) {
                return Err(primary_key_supplied(schema, column));
            }
            continue;
        }
        if !descriptor.is_nullable() && !record.contains(column) {
            return Err(Rejection::MissingRequiredColumn {
                table: schema.name().to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

/// Check for an UPDATE's SET data: a partial record is fine, but the primary
/// key may not be reassigned.
pub fn validate_update(schema: &TableSchema, data: &Record) -> Result<(), Rejection> {
    check_members(schema, data)?;
    check_types(schema, data)?;
    match schema.primary_key_column() {
        Some(pk) if data.contains(pk) => Err(primary_key_supplied(schema, pk)),
        _ => Ok(()),
    }
}

/// Check for WHERE conditions. The primary key is allowed here; NULL is not,
/// since `col = NULL` is never true.
pub fn validate_conditions(schema: &TableSchema, conditions: &Record) -> Result<(), Rejection> {
    check_members(schema, conditions)?;
    if let Some((column, _)) = conditions.iter().find(|(_, value)| value.is_null()) {
        return Err(Rejection::NullCondition {
            table: schema.name().to_string(),
            column: column.to_string(),
        });
    }
    check_types(schema, conditions)
}

fn check_members(schema: &TableSchema, record: &Record) -> Result<(), Rejection> {
    match record.columns().find(|c| !schema.has_column(c)) {
        Some(column) => Err(Rejection::UnknownColumn {
            table: schema.name().to_string(),
            column: column.to_string(),
        }),
        None => Ok(()),
    }
}

fn check_types(schema: &TableSchema, record: &Record) -> Result<(), Rejection> {
    for (column, value) in record.iter() {
        let Ok(descriptor) = schema.column(column) else {
            continue;
        };
        if !conforms(descriptor, value) {
            return Err(Rejection::TypeMismatch {
                table: schema.name().to_string(),
                column: column.to_string(),
                expected: descriptor.logical_type(),
                found: value.logical_type(),
            });
        }
    }
    Ok(())
}

// Types must match exactly; NULL is further barred from NOT NULL columns.
fn conforms(descriptor: &ColumnDescriptor, value: &Value) -> bool {
    value.logical_type() == descriptor.logical_type()
        && !(value.is_null() && !descriptor.is_nullable())
}

fn primary_key_supplied(schema: &TableSchema, column: &str) -> Rejection {
    Rejection::PrimaryKeySupplied {
        table: schema.name().to_string(),
        column: column.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passwords() -> TableSchema {
        TableSchema::builder("passwords")
            .column("password_id", ColumnDescriptor::integer().primary_key())
            .column("app_name", ColumnDescriptor::text().not_null())
            .column("notes", ColumnDescriptor::text())
            .column("strength", ColumnDescriptor::float())
            .build()
            .unwrap()
    }

    #[test]
    fn accepts_complete_record() {
        let record = Record::new().with("app_name", "mail").with("strength", 0.8);
        assert_eq!(validate(&passwords(), &record), Ok(()));
    }

    #[test]
    fn null_does_not_match_a_text_column() {
        let record = Record::new()
            .with("app_name", "mail")
            .with("notes", None::<String>);
        assert!(matches!(
            validate(&passwords(), &record),
            Err(Rejection::TypeMismatch { column, expected: LogicalType::Text, found: LogicalType::Null, .. })
                if column == "notes"
        ));
    }

    #[test]
    fn null_column_holds_null_only_when_nullable() {
        let optional = TableSchema::new("t", [("marker", ColumnDescriptor::null())]).unwrap();
        assert_eq!(validate(&optional, &Record::new().with("marker", Value::Null)), Ok(()));

        let required =
            TableSchema::new("t", [("marker", ColumnDescriptor::null().not_null())]).unwrap();
        assert!(matches!(
            validate(&required, &Record::new().with("marker", Value::Null)),
            Err(Rejection::TypeMismatch { .. })
        ));
        assert!(matches!(
            validate(&required, &Record::new().with("marker", 1)),
            Err(Rejection::TypeMismatch { .. })
        ));
    }

    #[test]
    fn rejects_supplied_primary_key() {
        let record = Record::new().with("password_id", 1).with("app_name", "mail");
        assert!(matches!(
            validate(&passwords(), &record),
            Err(Rejection::PrimaryKeySupplied { column, .. }) if column == "password_id"
        ));
    }

    #[test]
    fn rejects_missing_required_column() {
        let record = Record::new().with("notes", "x");
        assert!(matches!(
            validate(&passwords(), &record),
            Err(Rejection::MissingRequiredColumn { column, .. }) if column == "app_name"
        ));
    }

    #[test]
    fn optional_columns_may_be_omitted() {
        let record = Record::new().with("app_name", "mail");
        assert_eq!(validate(&passwords(), &record), Ok(()));
    }

    #[test]
    fn integer_is_not_a_float() {
        let record = Record::new().with("app_name", "mail").with("strength", 1);
        assert!(matches!(
            validate(&passwords(), &record),
            Err(Rejection::TypeMismatch { expected: LogicalType::Float, found: LogicalType::Integer, .. })
        ));
    }

    #[test]
    fn membership_is_checked_before_types() {
        let record = Record::new().with("strength", "high").with("color", "red");
        assert!(matches!(
            validate(&passwords(), &record),
            Err(Rejection::UnknownColumn { column, .. }) if column == "color"
        ));
    }

    #[test]
    fn update_allows_partial_data_but_not_the_key() {
        let schema = passwords();
        assert_eq!(validate_update(&schema, &Record::new().with("notes", "x")), Ok(()));
        assert!(matches!(
            validate_update(&schema, &Record::new().with("password_id", 2)),
            Err(Rejection::PrimaryKeySupplied { .. })
        ));
    }

    #[test]
    fn conditions_may_address_the_key() {
        let schema = passwords();
        assert_eq!(
            validate_conditions(&schema, &Record::new().with("password_id", 2)),
            Ok(())
        );
        assert!(matches!(
            validate_conditions(&schema, &Record::new().with("password_id", "2")),
            Err(Rejection::TypeMismatch { .. })
        ));
    }

    #[test]
    fn null_condition_is_rejected() {
        let conditions = Record::new().with("app_name", "mail").with("notes", Value::Null);
        assert!(matches!(
            validate_conditions(&passwords(), &conditions),
            Err(Rejection::NullCondition { column, .. }) if column == "notes"
        ));
    }
}
