use crate::db::schema::{PASSWORDS, USERS};
use crate::db::{Connection, PasswordEntry, User};
use crate::error::VaultError;
use crate::schema::registry::SchemaRegistry;
use crate::schema::table::TableSchema;
use crate::schema::value::Record;
use crate::sql::builder::{Statement, StatementBuilder, WhereJoiner};
use crate::sql::validator::{self, Rejection};
use tracing::{debug, info, warn};

/// Gatekeeper between callers and the connection: every write is validated
/// against its table before any text reaches the engine.
pub struct Store<'r, C> {
    registry: &'r SchemaRegistry,
    builder: StatementBuilder,
    conn: C,
}

impl<'r, C: Connection> Store<'r, C> {
    pub fn new(registry: &'r SchemaRegistry, builder: StatementBuilder, conn: C) -> Self {
        Self {
            registry,
            builder,
            conn,
        }
    }

    pub fn into_connection(self) -> C {
        self.conn
    }

    /// CREATE TABLE IF NOT EXISTS for every registered table, in order.
    pub async fn create_tables(&mut self) -> Result<(), VaultError> {
        for schema in self.registry.tables() {
            let sql = self.builder.create_table(schema);
            self.conn.execute(&sql, &[]).await?;
            info!(table = %schema.name(), "table ready");
        }
        Ok(())
    }

    pub async fn insert(&mut self, table: &str, record: &Record) -> Result<(), VaultError> {
        let schema = self.registry.get(table)?;
        check(schema, validator::validate(schema, record))?;
        let stmt = self.builder.insert(schema, record);
        self.run(stmt).await.map(|_| ())
    }

    pub async fn select_all(&mut self, table: &str) -> Result<Vec<Record>, VaultError> {
        let schema = self.registry.get(table)?;
        let stmt = self.builder.select_all(schema);
        self.run(stmt).await
    }

    pub async fn select_where(
        &mut self,
        table: &str,
        conditions: &Record,
    ) -> Result<Vec<Record>, VaultError> {
        let schema = self.registry.get(table)?;
        check(schema, validator::validate_conditions(schema, conditions))?;
        let stmt = self.builder.select_where(schema, conditions)?;
        self.run(stmt).await
    }

    pub async fn update_where(
        &mut self,
        table: &str,
        conditions: &Record,
        data: &Record,
    ) -> Result<(), VaultError> {
        let schema = self.registry.get(table)?;
        check(schema, validator::validate_update(schema, data))?;
        check(schema, validator::validate_conditions(schema, conditions))?;
        let stmt = self.builder.update_where(schema, conditions, data)?;
        self.run(stmt).await.map(|_| ())
    }

    pub async fn delete_where(&mut self, table: &str, conditions: &Record) -> Result<(), VaultError> {
        let schema = self.registry.get(table)?;
        check(schema, validator::validate_conditions(schema, conditions))?;
        let stmt = self.builder.delete_where(schema, conditions)?;
        self.run(stmt).await.map(|_| ())
    }

    /// The account logging in with `email`, if any.
    pub async fn user_by_email(&mut self, email: &str) -> Result<Option<User>, VaultError> {
        let rows = self
            .select_matching(USERS, &Record::new().with("email", email))
            .await?;
        rows.into_iter().next().map(User::try_from).transpose()
    }

    /// Every stored credential owned by `user_id`.
    pub async fn passwords_for(&mut self, user_id: i64) -> Result<Vec<PasswordEntry>, VaultError> {
        let rows = self
            .select_matching(PASSWORDS, &Record::new().with("user_id", user_id))
            .await?;
        rows.into_iter().map(PasswordEntry::try_from).collect()
    }

    /// The credential `user_id` stored for `url`, if any.
    pub async fn password_by_url(
        &mut self,
        user_id: i64,
        url: &str,
    ) -> Result<Option<PasswordEntry>, VaultError> {
        let conditions = Record::new().with("user_id", user_id).with("app_url", url);
        let rows = self.select_matching(PASSWORDS, &conditions).await?;
        rows.into_iter().next().map(PasswordEntry::try_from).transpose()
    }

    pub async fn commit(&mut self) -> Result<(), VaultError> {
        self.conn.commit().await
    }

    // Lookups always AND their predicates, whatever joiner the store renders
    // caller-supplied WHERE clauses with.
    async fn select_matching(
        &mut self,
        table: &str,
        conditions: &Record,
    ) -> Result<Vec<Record>, VaultError> {
        let schema = self.registry.get(table)?;
        check(schema, validator::validate_conditions(schema, conditions))?;
        let stmt = self
            .builder
            .with_joiner(WhereJoiner::And)
            .select_where(schema, conditions)?;
        self.run(stmt).await
    }

    async fn run(&mut self, stmt: Statement) -> Result<Vec<Record>, VaultError> {
        let rows = self.conn.execute(&stmt.sql, &stmt.params).await?;
        debug!(rows = rows.len(), "statement done");
        Ok(rows)
    }
}

fn check(schema: &TableSchema, outcome: Result<(), Rejection>) -> Result<(), VaultError> {
    outcome.map_err(|reason| {
        warn!(table = %schema.name(), %reason, "record rejected");
        VaultError::Rejected(reason)
    })
}
