use serde::Serialize;

use super::model::{MapLayer, NewFeature};
use super::source::SourceFeature;

/// Outcome of importing one workspace; returned even when some layers failed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ImportReport {
    pub workspace: String,
    pub layers: Vec<LayerImport>,
}

impl ImportReport {
    #[must_use]
    pub fn inserted(&self) -> u64 {
        self.layers.iter().map(|l| l.inserted).sum()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.layers.iter().filter(|l| l.error.is_some()).count()
    }
}

/// Per-layer counters. `skipped` covers features without an id and rows
/// already present in the layer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LayerImport {
    pub layer_id: i32,
    pub type_name: String,
    pub fetched: u64,
    pub inserted: u64,
    pub skipped: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LayerImport {
    pub(crate) fn start(layer: &MapLayer) -> Self {
        Self {
            layer_id: layer.id,
            type_name: layer.url.clone(),
            fetched: 0,
            inserted: 0,
            skipped: 0,
            error: None,
        }
    }
}

/// Maps fetched features onto rows of `layer_id`, dropping the ones without an id.
pub(crate) fn feature_rows(layer_id: i32, fetched: Vec<SourceFeature>) -> Vec<NewFeature> {
    fetched
        .into_iter()
        .filter_map(|f| {
            let name = f.id.filter(|id| !id.is_empty())?;
            let properties = f
                .properties
                .filter(|p| !p.is_null())
                .map(|p| p.to_string());
            Some(NewFeature {
                name,
                properties,
                layer_id,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rows_keep_id_as_name_and_properties_as_json_text() {
        let rows = feature_rows(
            7,
            vec![
                SourceFeature {
                    id: Some("restaurants.1".to_owned()),
                    properties: Some(json!({"name": "Pho 24"})),
                },
                SourceFeature {
                    id: None,
                    properties: Some(json!({"name": "anonymous"})),
                },
                SourceFeature {
                    id: Some("restaurants.2".to_owned()),
                    properties: Some(serde_json::Value::Null),
                },
            ],
        );

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "restaurants.1");
        assert_eq!(rows[0].properties.as_deref(), Some(r#"{"name":"Pho 24"}"#));
        assert_eq!(rows[0].layer_id, 7);
        assert_eq!(rows[1].properties, None);
    }

    #[test]
    fn report_totals() {
        let layer = MapLayer {
            id: 1,
            url: "ws:a".to_owned(),
            name: None,
        };
        let mut ok = LayerImport::start(&layer);
        ok.fetched = 3;
        ok.inserted = 2;
        ok.skipped = 1;
        let mut failed = LayerImport::start(&layer);
        failed.error = Some("boom".to_owned());

        let report = ImportReport {
            workspace: "ws".to_owned(),
            layers: vec![ok, failed],
        };
        assert_eq!(report.inserted(), 2);
        assert_eq!(report.failed(), 1);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["layers"][0].get("error").is_none());
        assert_eq!(json["layers"][1]["error"], "boom");
    }
}
