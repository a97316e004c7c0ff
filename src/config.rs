use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::VaultError;
use crate::schema::bindings::EngineKind;
use crate::sql::builder::WhereJoiner;

/// Process configuration: built-in defaults, overridden by environment
/// variables (`DB_ENGINE`, `DATABASE_URL`, `LOGLEVEL`, `WHERE_JOINER`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub db_engine: String,
    pub database_url: String,
    pub loglevel: String,
    pub where_joiner: WhereJoiner,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_engine: "sqlite".to_string(),
            database_url: "sqlite:password.db".to_string(),
            loglevel: "info".to_string(),
            where_joiner: WhereJoiner::Comma,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, VaultError> {
        let cfg = Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(&["db_engine", "database_url", "loglevel", "where_joiner"]))
            .extract()?;
        Ok(cfg)
    }

    /// Unknown engine names fail here, before anything connects.
    pub fn engine(&self) -> Result<EngineKind, VaultError> {
        self.db_engine.parse()
    }
}

pub static CONFIG: LazyLock<Config> =
    LazyLock::new(|| Config::load().expect("FATAL: invalid configuration"));

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_environment() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let cfg = Config::load().expect("config should load");
            assert_eq!(cfg, Config::default());
            assert_eq!(cfg.engine().unwrap(), EngineKind::Sqlite);
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("DB_ENGINE", "sqlite3");
            jail.set_env("DATABASE_URL", "sqlite::memory:");
            jail.set_env("WHERE_JOINER", "and");
            let cfg = Config::load().expect("config should load");
            assert_eq!(cfg.database_url, "sqlite::memory:");
            assert_eq!(cfg.where_joiner, WhereJoiner::And);
            assert_eq!(cfg.engine().unwrap(), EngineKind::Sqlite);
            Ok(())
        });
    }

    #[test]
    fn unknown_engine_fails_fast() {
        Jail::expect_with(|jail| {
            jail.set_env("DB_ENGINE", "oracle");
            let cfg = Config::load().expect("config should load");
            assert!(matches!(cfg.engine(), Err(VaultError::UnknownEngine(name)) if name == "oracle"));
            Ok(())
        });
    }
}
