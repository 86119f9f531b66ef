/// A WFS feature type registered for import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapLayer {
    pub id: i32,
    /// WFS `typeName`, e.g. `hanoi:restaurants`.
    pub url: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewMapLayer {
    pub url: String,
    pub name: Option<String>,
}

/// Coalesce update: `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct MapLayerPatch {
    pub url: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub id: i32,
    pub name: String,
    /// Stored as text; usually a JSON object.
    pub properties: Option<String>,
    pub layer_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeature {
    pub name: String,
    pub properties: Option<String>,
    pub layer_id: i32,
}

#[derive(Debug, Clone, Default)]
pub struct FeaturePatch {
    pub name: Option<String>,
    pub properties: Option<String>,
}
