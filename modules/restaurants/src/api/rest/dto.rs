use serde::{Deserialize, Serialize};
use webgis_geojson::{Feature, FeatureCollection, Wgs84Point};

use crate::domain::error::DomainError;
use crate::domain::model::{NewRestaurant, Restaurant, RestaurantPatch};

/// Non-spatial columns of a restaurant, placed into `Feature.properties`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantProperties {
    pub id: i32,
    pub name: String,
    pub cuisine: Option<String>,
    pub addr_street: Option<String>,
    pub addr_housenumber: Option<String>,
}

pub type RestaurantFeature = Feature<RestaurantProperties>;
pub type RestaurantCollection = FeatureCollection<RestaurantProperties>;

impl From<Restaurant> for RestaurantFeature {
    fn from(r: Restaurant) -> Self {
        Feature::new(
            RestaurantProperties {
                id: r.id,
                name: r.name,
                cuisine: r.cuisine,
                addr_street: r.addr_street,
                addr_housenumber: r.addr_housenumber,
            },
            r.geometry,
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRestaurantReq {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub cuisine: Option<String>,
    pub addr_street: Option<String>,
    pub addr_housenumber: Option<String>,
}

/// Every field is optional; JSON `null` means the same as an absent field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRestaurantReq {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub cuisine: Option<String>,
    pub addr_street: Option<String>,
    pub addr_housenumber: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

fn non_blank_name(name: String) -> Result<String, DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name", "must not be blank"));
    }
    Ok(name)
}

impl TryFrom<CreateRestaurantReq> for NewRestaurant {
    type Error = DomainError;

    fn try_from(req: CreateRestaurantReq) -> Result<Self, Self::Error> {
        let name = req
            .name
            .ok_or_else(|| DomainError::validation("name", "is required"))?;
        let latitude = req
            .latitude
            .ok_or_else(|| DomainError::validation("latitude", "is required"))?;
        let longitude = req
            .longitude
            .ok_or_else(|| DomainError::validation("longitude", "is required"))?;
        Ok(Self {
            name: non_blank_name(name)?,
            location: Wgs84Point::new(latitude, longitude)?,
            cuisine: req.cuisine,
            addr_street: req.addr_street,
            addr_housenumber: req.addr_housenumber,
        })
    }
}

impl TryFrom<UpdateRestaurantReq> for RestaurantPatch {
    type Error = DomainError;

    fn try_from(req: UpdateRestaurantReq) -> Result<Self, Self::Error> {
        Ok(Self {
            name: req.name.map(non_blank_name).transpose()?,
            location: Wgs84Point::from_pair(req.latitude, req.longitude)?,
            cuisine: req.cuisine,
            addr_street: req.addr_street,
            addr_housenumber: req.addr_housenumber,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zero_coordinates_are_valid() {
        let req = CreateRestaurantReq {
            name: Some("Null Island Cafe".to_owned()),
            latitude: Some(0.0),
            longitude: Some(0.0),
            ..CreateRestaurantReq::default()
        };
        assert!(NewRestaurant::try_from(req).is_ok());
    }

    #[test]
    fn missing_longitude_names_the_field() {
        let req = CreateRestaurantReq {
            name: Some("Pho 24".to_owned()),
            latitude: Some(10.77),
            ..CreateRestaurantReq::default()
        };
        let err = NewRestaurant::try_from(req).unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "longitude"));
    }

    #[test]
    fn lone_latitude_in_patch_keeps_location_unset() {
        let req: UpdateRestaurantReq = serde_json::from_value(json!({"latitude": 11.0})).unwrap();
        let patch = RestaurantPatch::try_from(req).unwrap();
        assert!(patch.location.is_none());
        assert!(patch.is_empty());
    }

    #[test]
    fn explicit_nulls_equal_absent_fields() {
        let req: UpdateRestaurantReq =
            serde_json::from_value(json!({"name": null, "cuisine": null})).unwrap();
        assert!(RestaurantPatch::try_from(req).unwrap().is_empty());
    }

    #[test]
    fn out_of_range_pair_in_patch_is_rejected() {
        let req: UpdateRestaurantReq =
            serde_json::from_value(json!({"latitude": 91.0, "longitude": 0.0})).unwrap();
        let err = RestaurantPatch::try_from(req).unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "latitude"));
    }

    #[test]
    fn feature_shape_has_null_optionals() {
        let feature = RestaurantFeature::from(Restaurant {
            id: 3,
            name: "Banh Mi".to_owned(),
            geometry: None,
            cuisine: None,
            addr_street: None,
            addr_housenumber: None,
        });
        assert_eq!(
            serde_json::to_value(feature).unwrap(),
            json!({
                "type": "Feature",
                "properties": {
                    "id": 3,
                    "name": "Banh Mi",
                    "cuisine": null,
                    "addr_street": null,
                    "addr_housenumber": null
                },
                "geometry": null
            })
        );
    }
}
