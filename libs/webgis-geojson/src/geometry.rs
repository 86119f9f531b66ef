use serde::{Deserialize, Serialize};

use crate::GeoJsonError;

/// `[longitude, latitude]`, optionally followed by elevation.
pub type Position = Vec<f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<Geometry> },
}

impl Geometry {
    /// Parses the text produced by `ST_AsGeoJSON`.
    ///
    /// # Errors
    /// Returns `GeoJsonError::InvalidGeometry` if the text is not a GeoJSON geometry.
    pub fn from_geojson_str(text: &str) -> Result<Self, GeoJsonError> {
        Ok(serde_json::from_str(text)?)
    }

    #[must_use]
    pub fn point(point: Wgs84Point) -> Self {
        Self::Point {
            coordinates: vec![point.longitude(), point.latitude()],
        }
    }
}

/// A point that is known to lie inside the WGS84 (SRID 4326) domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wgs84Point {
    latitude: f64,
    longitude: f64,
}

impl Wgs84Point {
    /// # Errors
    /// Returns an error when either coordinate is non-finite or out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoJsonError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoJsonError::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoJsonError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Builds a point only when both coordinates are present.
    ///
    /// # Errors
    /// Propagates the range check of [`Wgs84Point::new`].
    pub fn from_pair(
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Option<Self>, GeoJsonError> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Self::new(lat, lon).map(Some),
            _ => Ok(None),
        }
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_postgis_point() {
        let g = Geometry::from_geojson_str(r#"{"type":"Point","coordinates":[106.7,10.77]}"#)
            .unwrap();
        assert_eq!(
            g,
            Geometry::Point {
                coordinates: vec![106.7, 10.77]
            }
        );
    }

    #[test]
    fn parses_nested_collection() {
        let text = r#"{"type":"GeometryCollection","geometries":[
            {"type":"LineString","coordinates":[[0,0],[1,1]]},
            {"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}
        ]}"#;
        let Geometry::GeometryCollection { geometries } = Geometry::from_geojson_str(text).unwrap()
        else {
            panic!("expected a collection");
        };
        assert_eq!(geometries.len(), 2);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            Geometry::from_geojson_str("POINT(1 2)"),
            Err(GeoJsonError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn point_serializes_lon_before_lat() {
        let p = Wgs84Point::new(10.77, 106.70).unwrap();
        let json = serde_json::to_value(Geometry::point(p)).unwrap();
        assert_eq!(json, json!({"type": "Point", "coordinates": [106.70, 10.77]}));
    }

    #[test]
    fn range_is_inclusive_at_the_edges() {
        assert!(Wgs84Point::new(90.0, 180.0).is_ok());
        assert!(Wgs84Point::new(-90.0, -180.0).is_ok());
        assert!(Wgs84Point::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn out_of_range_and_nan_are_rejected() {
        assert!(matches!(
            Wgs84Point::new(90.5, 0.0),
            Err(GeoJsonError::LatitudeOutOfRange(_))
        ));
        assert!(matches!(
            Wgs84Point::new(0.0, -180.1),
            Err(GeoJsonError::LongitudeOutOfRange(_))
        ));
        assert!(Wgs84Point::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn partial_pair_yields_no_point() {
        assert_eq!(Wgs84Point::from_pair(Some(1.0), None).unwrap(), None);
        assert_eq!(Wgs84Point::from_pair(None, Some(1.0)).unwrap(), None);
        assert!(Wgs84Point::from_pair(Some(1.0), Some(2.0)).unwrap().is_some());
    }
}
