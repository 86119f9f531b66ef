use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::error::DomainError;
use crate::domain::model::{
    Feature, FeaturePatch, MapLayer, MapLayerPatch, NewFeature, NewMapLayer,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLayerDto {
    pub id: i32,
    pub url: String,
    pub name: Option<String>,
}

impl From<MapLayer> for MapLayerDto {
    fn from(l: MapLayer) -> Self {
        Self {
            id: l.id,
            url: l.url,
            name: l.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDto {
    pub id: i32,
    pub name: String,
    /// Parsed JSON when the stored text is valid JSON, the raw string otherwise.
    pub properties: Option<Value>,
    pub layer_id: i32,
}

impl From<Feature> for FeatureDto {
    fn from(f: Feature) -> Self {
        let properties = f.properties.map(|text| {
            serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text))
        });
        Self {
            id: f.id,
            name: f.name,
            properties,
            layer_id: f.layer_id,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMapLayerReq {
    pub url: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMapLayerReq {
    pub url: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateFeatureReq {
    pub name: Option<String>,
    pub properties: Option<Value>,
    #[serde(alias = "layerId")]
    pub layer_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFeatureReq {
    pub name: Option<String>,
    pub properties: Option<Value>,
}

fn non_blank(field: &str, value: String) -> Result<String, DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "must not be blank"));
    }
    Ok(value)
}

/// Strings are stored verbatim, any other JSON value as its serialized text.
fn properties_text(properties: Option<Value>) -> Option<String> {
    match properties? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

impl TryFrom<CreateMapLayerReq> for NewMapLayer {
    type Error = DomainError;

    fn try_from(req: CreateMapLayerReq) -> Result<Self, Self::Error> {
        let url = req
            .url
            .ok_or_else(|| DomainError::validation("url", "is required"))?;
        Ok(Self {
            url: non_blank("url", url)?,
            name: req.name,
        })
    }
}

impl TryFrom<UpdateMapLayerReq> for MapLayerPatch {
    type Error = DomainError;

    fn try_from(req: UpdateMapLayerReq) -> Result<Self, Self::Error> {
        Ok(Self {
            url: req.url.map(|u| non_blank("url", u)).transpose()?,
            name: req.name,
        })
    }
}

impl TryFrom<CreateFeatureReq> for NewFeature {
    type Error = DomainError;

    fn try_from(req: CreateFeatureReq) -> Result<Self, Self::Error> {
        let name = req
            .name
            .ok_or_else(|| DomainError::validation("name", "is required"))?;
        let layer_id = req
            .layer_id
            .ok_or_else(|| DomainError::validation("layer_id", "is required"))?;
        Ok(Self {
            name: non_blank("name", name)?,
            properties: properties_text(req.properties),
            layer_id,
        })
    }
}

impl TryFrom<UpdateFeatureReq> for FeaturePatch {
    type Error = DomainError;

    fn try_from(req: UpdateFeatureReq) -> Result<Self, Self::Error> {
        Ok(Self {
            name: req.name.map(|n| non_blank("name", n)).transpose()?,
            properties: properties_text(req.properties),
        })
    }
}
