use sea_orm::ActiveValue::{NotSet, Set};

use super::entity::{feature, map_layer};
use crate::domain::model::{Feature, FeaturePatch, MapLayer, MapLayerPatch, NewFeature};

impl From<map_layer::Model> for MapLayer {
    fn from(m: map_layer::Model) -> Self {
        Self {
            id: m.id,
            url: m.url,
            name: m.name,
        }
    }
}

impl From<feature::Model> for Feature {
    fn from(m: feature::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            properties: m.properties,
            layer_id: m.layer_id,
        }
    }
}

impl From<NewFeature> for feature::ActiveModel {
    fn from(new: NewFeature) -> Self {
        Self {
            id: NotSet,
            name: Set(new.name),
            properties: Set(new.properties),
            layer_id: Set(new.layer_id),
        }
    }
}

/// Sets only the columns present in the patch.
pub fn apply_layer_patch(am: &mut map_layer::ActiveModel, patch: MapLayerPatch) {
    if let Some(url) = patch.url {
        am.url = Set(url);
    }
    if let Some(name) = patch.name {
        am.name = Set(Some(name));
    }
}

pub fn apply_feature_patch(am: &mut feature::ActiveModel, patch: FeaturePatch) {
    if let Some(name) = patch.name {
        am.name = Set(name);
    }
    if let Some(properties) = patch.properties {
        am.properties = Set(Some(properties));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::IntoActiveModel;

    #[test]
    fn layer_patch_keeps_absent_columns() {
        let mut am = map_layer::Model {
            id: 1,
            url: "hanoi:restaurants".to_owned(),
            name: Some("Restaurants".to_owned()),
        }
        .into_active_model();

        apply_layer_patch(
            &mut am,
            MapLayerPatch {
                url: None,
                name: Some("Eateries".to_owned()),
            },
        );

        assert!(!am.url.is_set());
        assert_eq!(am.name, Set(Some("Eateries".to_owned())));
    }

    #[test]
    fn new_feature_leaves_id_to_the_database() {
        let am: feature::ActiveModel = NewFeature {
            name: "restaurants.1".to_owned(),
            properties: None,
            layer_id: 3,
        }
        .into();
        assert_eq!(am.id, NotSet);
        assert_eq!(am.layer_id, Set(3));
    }
}
