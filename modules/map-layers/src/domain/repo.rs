use async_trait::async_trait;

use super::error::DomainError;
use super::model::{Feature, FeaturePatch, MapLayer, MapLayerPatch, NewFeature, NewMapLayer};

#[async_trait]
pub trait MapLayersRepository: Send + Sync {
    async fn list_layers(&self) -> Result<Vec<MapLayer>, DomainError>;
    async fn find_layer(&self, id: i32) -> Result<Option<MapLayer>, DomainError>;
    async fn insert_layer(&self, new: NewMapLayer) -> Result<MapLayer, DomainError>;
    async fn update_layer(
        &self,
        id: i32,
        patch: MapLayerPatch,
    ) -> Result<Option<MapLayer>, DomainError>;
    /// Deletes the layer and, by cascade, its features.
    async fn delete_layer(&self, id: i32) -> Result<Option<MapLayer>, DomainError>;

    async fn layer_features(&self, layer_id: i32) -> Result<Vec<Feature>, DomainError>;
    /// Case-insensitive literal substring match on the feature name.
    async fn search_features(&self, fragment: &str) -> Result<Vec<Feature>, DomainError>;
    async fn insert_feature(&self, new: NewFeature) -> Result<Feature, DomainError>;
    async fn update_feature(
        &self,
        id: i32,
        patch: FeaturePatch,
    ) -> Result<Option<Feature>, DomainError>;
    async fn delete_feature(&self, id: i32) -> Result<Option<Feature>, DomainError>;

    /// Bulk insert that leaves existing `(name, layer_id)` rows untouched.
    /// Returns the number of rows actually inserted.
    async fn insert_features_skip_duplicates(
        &self,
        rows: Vec<NewFeature>,
    ) -> Result<u64, DomainError>;
}
