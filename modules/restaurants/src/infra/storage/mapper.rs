//! Row to domain mapping. The geometry column arrives as `ST_AsGeoJSON` text.

use sea_orm::FromQueryResult;
use webgis_geojson::{GeoJsonError, Geometry};

use crate::domain::model::Restaurant;

#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct RestaurantRow {
    pub id: i32,
    pub name: String,
    pub geometry: Option<String>,
    pub cuisine: Option<String>,
    pub addr_street: Option<String>,
    pub addr_housenumber: Option<String>,
}

impl TryFrom<RestaurantRow> for Restaurant {
    type Error = GeoJsonError;

    fn try_from(row: RestaurantRow) -> Result<Self, Self::Error> {
        let geometry = row
            .geometry
            .as_deref()
            .map(Geometry::from_geojson_str)
            .transpose()?;
        Ok(Self {
            id: row.id,
            name: row.name,
            geometry,
            cuisine: row.cuisine,
            addr_street: row.addr_street,
            addr_housenumber: row.addr_housenumber,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(geometry: Option<&str>) -> RestaurantRow {
        RestaurantRow {
            id: 1,
            name: "Pho 24".to_owned(),
            geometry: geometry.map(str::to_owned),
            cuisine: Some("vietnamese".to_owned()),
            addr_street: None,
            addr_housenumber: None,
        }
    }

    #[test]
    fn decodes_point_geometry() {
        let r = Restaurant::try_from(row(Some(
            r#"{"type":"Point","coordinates":[106.7,10.77]}"#,
        )))
        .unwrap();
        assert_eq!(
            r.geometry,
            Some(Geometry::Point {
                coordinates: vec![106.7, 10.77]
            })
        );
        assert_eq!(r.cuisine.as_deref(), Some("vietnamese"));
    }

    #[test]
    fn null_geometry_stays_none() {
        let r = Restaurant::try_from(row(None)).unwrap();
        assert!(r.geometry.is_none());
    }

    #[test]
    fn malformed_geometry_is_an_error() {
        assert!(Restaurant::try_from(row(Some("{oops"))).is_err());
    }
}
