//! Typed database settings and the SeaORM connection pool built from them.

mod config;
mod connect;

pub use config::{DbConfig, DbEngine, redact_credentials_in_dsn};
pub use connect::connect;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Unknown DSN: {0}")]
    UnknownDsn(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Sea(#[from] sea_orm::DbErr),
}
