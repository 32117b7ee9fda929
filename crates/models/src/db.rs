use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Each connection to an in-memory SQLite URL opens its own empty database,
/// so such pools are pinned to one connection.
pub(crate) fn pool_bounds(cfg: &configs::DatabaseConfig) -> (u32, u32) {
    if cfg.is_sqlite() && cfg.url.contains(":memory:") {
        (1, 1)
    } else {
        (cfg.max_connections, cfg.min_connections)
    }
}

/// Open a pool sized and timed from `[database]` in the app config.
pub async fn connect_with_config(cfg: &configs::DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let (max, min) = pool_bounds(cfg);
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(max)
        .min_connections(min)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opts).await?;
    tracing::info!(max, min, "database pool ready");
    Ok(db)
}

/// Private in-memory SQLite database on a single connection.
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_string());
    opts.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(opts).await?;
    Ok(db)
}
