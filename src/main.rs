use mimalloc::MiMalloc;
use pwvault::db::{SqliteAdapter, schema};
use pwvault::schema::registry;
use pwvault::{Store, StatementBuilder};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &pwvault::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        db_engine = %cfg.db_engine,
        database_url = %cfg.database_url,
        loglevel = %cfg.loglevel,
        where_joiner = ?cfg.where_joiner
    );

    let engine = cfg.engine()?;
    let registry = registry::init(schema::all()?)?;
    let builder = StatementBuilder::new(engine).with_joiner(cfg.where_joiner);

    let conn = SqliteAdapter::connect(&cfg.database_url).await?;
    let mut store = Store::new(registry, builder, conn);
    store.create_tables().await?;
    store.commit().await?;
    info!(tables = registry.len(), "database ready");

    // Optional: dump one table as JSON lines.
    if let Some(table) = std::env::args().nth(1) {
        match store.select_all(&table).await {
            Ok(rows) => {
                for row in rows {
                    println!("{}", serde_json::to_string(&row)?);
                }
            }
            Err(e) => {
                warn!(table = %table, error = %e, "failed to read table");
                return Err(e.into());
            }
        }
    }
    Ok(())
}
