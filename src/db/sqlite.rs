use crate::db::Connection;
use crate::error::VaultError;
use crate::schema::bindings::{self, EngineKind, LogicalType};
use crate::schema::value::{Record, Value};
use sqlx::query::Query;
use sqlx::sqlite::{
    SqliteArguments, SqliteConnectOptions, SqlitePoolOptions, SqliteRow,
};
use sqlx::{Column, Pool, Row, Sqlite, Transaction, TypeInfo, ValueRef};
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

/// SQLite [`Connection`] over a single-connection sqlx pool.
///
/// The first `execute` after a commit opens a transaction; `commit` closes it.
/// Dropping the adapter with an open transaction rolls it back.
pub struct SqliteAdapter {
    pool: SqlitePool,
    tx: Option<Transaction<'static, Sqlite>>,
}

impl SqliteAdapter {
    /// Open (creating if missing) the database at `url` with foreign keys on.
    pub async fn connect(url: &str) -> Result<Self, VaultError> {
        let connect_opts = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);
        // One writer; also keeps `sqlite::memory:` a single database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(connect_opts)
            .await?;
        Ok(Self::new(pool))
    }

    pub fn new(pool: SqlitePool) -> Self {
        Self { pool, tx: None }
    }

    fn bind_params<'q>(
        sql: &'q str,
        params: &'q [Value],
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        params.iter().fold(sqlx::query(sql), |query, value| match value {
            Value::Integer(i) => query.bind(*i),
            Value::Float(x) => query.bind(*x),
            Value::Text(s) => query.bind(s.as_str()),
            Value::Null => query.bind(None::<String>),
        })
    }

    fn row_to_record(row: &SqliteRow) -> Result<Record, VaultError> {
        let mut record = Record::new();
        for column in row.columns() {
            let name = column.name();
            let idx = column.ordinal();
            let decode_err = |e: sqlx::Error| VaultError::Decode {
                column: name.to_string(),
                reason: e.to_string(),
            };

            let raw = row.try_get_raw(idx).map_err(decode_err)?;
            let ty = if raw.is_null() {
                LogicalType::Null
            } else {
                bindings::logical_type_for(EngineKind::Sqlite, raw.type_info().name())?
            };

            let value = match ty {
                LogicalType::Integer => Value::Integer(row.try_get(idx).map_err(decode_err)?),
                LogicalType::Float => Value::Float(row.try_get(idx).map_err(decode_err)?),
                LogicalType::Text => Value::Text(row.try_get(idx).map_err(decode_err)?),
                LogicalType::Null => Value::Null,
            };
            record.set(name, value);
        }
        Ok(record)
    }
}

impl Connection for SqliteAdapter {
    async fn execute(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Record>, VaultError> {
        let tx = match self.tx.take() {
            Some(tx) => tx,
            None => self.pool.begin().await?,
        };
        let tx = self.tx.insert(tx);

        debug!(sql = %sql, params = params.len(), "executing statement");
        let rows = Self::bind_params(sql, params)
            .fetch_all(&mut **tx)
            .await
            .map_err(|source| VaultError::Execution {
                statement: sql.to_string(),
                source,
            })?;
        rows.iter().map(Self::row_to_record).collect()
    }

    async fn commit(&mut self) -> Result<(), VaultError> {
        match self.tx.take() {
            Some(tx) => tx.commit().await.map_err(VaultError::Commit),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn decodes_each_storage_class() {
        let mut conn = SqliteAdapter::connect("sqlite::memory:").await.unwrap();
        let rows = conn
            .execute(
                "SELECT ? AS i, ? AS f, ? AS t, ? AS n;",
                &[
                    Value::Integer(4),
                    Value::Float(0.25),
                    Value::from("x"),
                    Value::Null,
                ],
            )
            .await
            .unwrap();
        assert_eq!(
            rows,
            vec![
                Record::new()
                    .with("i", 4)
                    .with("f", 0.25)
                    .with("t", "x")
                    .with("n", Value::Null)
            ]
        );
    }

    #[tokio::test]
    async fn blob_columns_are_not_decoded() {
        let mut conn = SqliteAdapter::connect("sqlite::memory:").await.unwrap();
        let err = conn.execute("SELECT x'00' AS b;", &[]).await.unwrap_err();
        assert!(matches!(err, VaultError::UnknownType { keyword, .. } if keyword == "BLOB"));
    }

    #[tokio::test]
    async fn engine_errors_carry_the_statement() {
        let mut conn = SqliteAdapter::connect("sqlite::memory:").await.unwrap();
        let err = conn.execute("SELECT * FROM missing;", &[]).await.unwrap_err();
        match err {
            VaultError::Execution { statement, .. } => {
                assert_eq!(statement, "SELECT * FROM missing;")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn commit_without_work_is_a_no_op() {
        let mut conn = SqliteAdapter::connect("sqlite::memory:").await.unwrap();
        conn.commit().await.unwrap();
    }
}
