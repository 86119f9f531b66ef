use serde::{Deserialize, Serialize};

use crate::Geometry;

/// A GeoJSON `Feature`. A missing geometry serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature<P> {
    pub properties: P,
    pub geometry: Option<Geometry>,
}

impl<P> Feature<P> {
    pub const fn new(properties: P, geometry: Option<Geometry>) -> Self {
        Self {
            properties,
            geometry,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection<P> {
    pub features: Vec<Feature<P>>,
}

impl<P> FeatureCollection<P> {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl<P> FromIterator<Feature<P>> for FeatureCollection<P> {
    fn from_iter<I: IntoIterator<Item = Feature<P>>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Props {
        name: String,
        cuisine: Option<String>,
    }

    #[test]
    fn feature_has_type_tag_and_null_members() {
        let f = Feature::new(
            Props {
                name: "Pho 24".to_owned(),
                cuisine: None,
            },
            None,
        );
        assert_eq!(
            serde_json::to_value(&f).unwrap(),
            json!({
                "type": "Feature",
                "properties": {"name": "Pho 24", "cuisine": null},
                "geometry": null
            })
        );
    }

    #[test]
    fn empty_collection_keeps_features_array() {
        let fc: FeatureCollection<Props> = std::iter::empty().collect();
        assert!(fc.is_empty());
        assert_eq!(
            serde_json::to_value(&fc).unwrap(),
            json!({"type": "FeatureCollection", "features": []})
        );
    }

    #[test]
    fn collection_reads_back_from_json() {
        let text = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"name":"A","cuisine":"bbq"},
             "geometry":{"type":"Point","coordinates":[1.0,2.0]}}
        ]}"#;
        let fc: FeatureCollection<Props> = serde_json::from_str(text).unwrap();
        assert_eq!(fc.features[0].properties.cuisine.as_deref(), Some("bbq"));
        assert!(matches!(fc.features[0].geometry, Some(Geometry::Point { .. })));
    }
}
