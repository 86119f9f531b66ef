//! Restaurants module.
//!
//! Restaurants live in a PostGIS table with a `geometry(Point, 4326)` column
//! and are served as GeoJSON features. Updates are sparse: absent fields keep
//! their stored values.

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;

pub use api::rest::routes::router;
pub use config::RestaurantsConfig;
pub use domain::service::Service;
pub use infra::storage::migrations::Migrator;
pub use infra::storage::sql_repo::SqlRestaurantRepository;
