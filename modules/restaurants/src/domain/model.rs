use webgis_geojson::{Geometry, Wgs84Point};

/// A stored restaurant with its geometry already decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub geometry: Option<Geometry>,
    pub cuisine: Option<String>,
    pub addr_street: Option<String>,
    pub addr_housenumber: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRestaurant {
    pub name: String,
    pub location: Wgs84Point,
    pub cuisine: Option<String>,
    pub addr_street: Option<String>,
    pub addr_housenumber: Option<String>,
}

/// Sparse update. `None` keeps the stored value.
///
/// `location` is only set when both coordinates were supplied, so a lone
/// latitude or longitude never touches the stored geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantPatch {
    pub name: Option<String>,
    pub location: Option<Wgs84Point>,
    pub cuisine: Option<String>,
    pub addr_street: Option<String>,
    pub addr_housenumber: Option<String>,
}

impl RestaurantPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.location.is_none()
            && self.cuisine.is_none()
            && self.addr_street.is_none()
            && self.addr_housenumber.is_none()
    }
}

/// One page of a name-ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u64,
    pub offset: u64,
}
