//! GeoJSON (RFC 7946) model used for every spatial response.
//!
//! Geometries arrive from PostGIS as `ST_AsGeoJSON` text and are parsed into
//! [`Geometry`]; rows become [`Feature`]s whose non-spatial columns are the
//! `properties`.

mod feature;
mod geometry;

pub use feature::{Feature, FeatureCollection};
pub use geometry::{Geometry, Position, Wgs84Point};

#[derive(Debug, thiserror::Error)]
pub enum GeoJsonError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("invalid geometry: {0}")]
    InvalidGeometry(#[from] serde_json::Error),
}
