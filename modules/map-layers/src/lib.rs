//! Map layers module.
//!
//! A map layer names a WFS feature type (`url`). Features belong to one layer
//! and are unique per `(name, layer)`, which makes the bulk import from the
//! WFS server safe to re-run.

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;

pub use api::rest::routes::router;
pub use config::GeoServerConfig;
pub use domain::import::{ImportReport, LayerImport};
pub use domain::service::Service;
pub use infra::storage::migrations::Migrator;
pub use infra::storage::sea_orm_repo::SeaOrmMapLayersRepository;
pub use infra::wfs::WfsClient;
