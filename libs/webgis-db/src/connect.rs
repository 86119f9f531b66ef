use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::{DbConfig, Result, redact_credentials_in_dsn};

fn connect_options(cfg: &DbConfig) -> ConnectOptions {
    let mut opts = ConnectOptions::new(cfg.dsn.clone());
    if let Some(n) = cfg.max_conns {
        opts.max_connections(n);
    }
    if let Some(n) = cfg.min_conns {
        opts.min_connections(n);
    }
    if let Some(t) = cfg.acquire_timeout() {
        opts.acquire_timeout(t);
    }
    if let Some(t) = cfg.idle_timeout() {
        opts.idle_timeout(t);
    }
    opts.sqlx_logging(cfg.sqlx_logging);
    opts
}

/// Opens the connection pool described by `cfg`.
///
/// # Errors
/// Returns an error if the configuration is invalid or the database is unreachable.
pub async fn connect(cfg: &DbConfig) -> Result<DatabaseConnection> {
    cfg.validate()?;
    let engine = cfg.engine()?;
    tracing::debug!(
        dsn = %redact_credentials_in_dsn(Some(&cfg.dsn)),
        engine = ?engine,
        "Connecting to database"
    );
    let db = Database::connect(connect_options(cfg)).await?;
    tracing::info!(engine = ?engine, "Database connection pool ready");
    Ok(db)
}
