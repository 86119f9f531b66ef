use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, instrument, warn};

use super::error::DomainError;
use super::import::{ImportReport, LayerImport, feature_rows};
use super::model::{Feature, FeaturePatch, MapLayer, MapLayerPatch, NewFeature, NewMapLayer};
use super::repo::MapLayersRepository;
use super::source::FeatureSource;

/// Map layer and feature use cases, including the bulk import from a [`FeatureSource`].
pub struct Service {
    repo: Arc<dyn MapLayersRepository>,
    source: Arc<dyn FeatureSource>,
}

impl Service {
    pub fn new(repo: Arc<dyn MapLayersRepository>, source: Arc<dyn FeatureSource>) -> Self {
        Self { repo, source }
    }

    #[instrument(skip(self))]
    pub async fn list_layers(&self) -> Result<Vec<MapLayer>, DomainError> {
        self.repo.list_layers().await
    }

    #[instrument(skip(self))]
    pub async fn get_layer(&self, id: i32) -> Result<MapLayer, DomainError> {
        self.repo
            .find_layer(id)
            .await?
            .ok_or(DomainError::LayerNotFound(id))
    }

    #[instrument(skip(self, new), fields(url = %new.url))]
    pub async fn create_layer(&self, new: NewMapLayer) -> Result<MapLayer, DomainError> {
        let layer = self.repo.insert_layer(new).await?;
        info!(layer_id = layer.id, "map layer created");
        Ok(layer)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_layer(
        &self,
        id: i32,
        patch: MapLayerPatch,
    ) -> Result<MapLayer, DomainError> {
        let layer = self
            .repo
            .update_layer(id, patch)
            .await?
            .ok_or(DomainError::LayerNotFound(id))?;
        info!(layer_id = id, "map layer updated");
        Ok(layer)
    }

    #[instrument(skip(self))]
    pub async fn delete_layer(&self, id: i32) -> Result<MapLayer, DomainError> {
        let layer = self
            .repo
            .delete_layer(id)
            .await?
            .ok_or(DomainError::LayerNotFound(id))?;
        info!(layer_id = id, "map layer deleted");
        Ok(layer)
    }

    #[instrument(skip(self))]
    pub async fn layer_features(&self, layer_id: i32) -> Result<Vec<Feature>, DomainError> {
        self.get_layer(layer_id).await?;
        self.repo.layer_features(layer_id).await
    }

    #[instrument(skip(self))]
    pub async fn find_features(&self, fragment: &str) -> Result<Vec<Feature>, DomainError> {
        let found = self.repo.search_features(fragment).await?;
        if found.is_empty() {
            return Err(DomainError::NoMatch(fragment.to_owned()));
        }
        debug!(count = found.len(), "found features by name");
        Ok(found)
    }

    #[instrument(skip(self, new), fields(name = %new.name, layer_id = new.layer_id))]
    pub async fn create_feature(&self, new: NewFeature) -> Result<Feature, DomainError> {
        self.get_layer(new.layer_id).await?;
        let feature = self.repo.insert_feature(new).await?;
        info!(feature_id = feature.id, "feature created");
        Ok(feature)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_feature(
        &self,
        id: i32,
        patch: FeaturePatch,
    ) -> Result<Feature, DomainError> {
        let feature = self
            .repo
            .update_feature(id, patch)
            .await?
            .ok_or(DomainError::FeatureNotFound(id))?;
        info!(feature_id = id, "feature updated");
        Ok(feature)
    }

    #[instrument(skip(self))]
    pub async fn delete_feature(&self, id: i32) -> Result<Feature, DomainError> {
        let feature = self
            .repo
            .delete_feature(id)
            .await?
            .ok_or(DomainError::FeatureNotFound(id))?;
        info!(feature_id = id, "feature deleted");
        Ok(feature)
    }

    /// Imports every layer of `workspace` concurrently. A failing layer is
    /// logged and reported; the remaining layers still run.
    #[instrument(skip(self))]
    pub async fn import(&self, workspace: &str) -> Result<ImportReport, DomainError> {
        let workspace = validate_workspace(workspace)?;
        let layers = self.repo.list_layers().await?;
        info!(layers = layers.len(), "starting feature import");

        let imports = join_all(
            layers
                .iter()
                .map(|layer| self.import_layer(workspace, layer)),
        )
        .await;

        let report = ImportReport {
            workspace: workspace.to_owned(),
            layers: imports,
        };
        info!(
            inserted = report.inserted(),
            failed = report.failed(),
            "feature import finished"
        );
        Ok(report)
    }

    async fn import_layer(&self, workspace: &str, layer: &MapLayer) -> LayerImport {
        let mut outcome = LayerImport::start(layer);
        if let Err(e) = self.fill_layer(workspace, layer, &mut outcome).await {
            warn!(layer_id = layer.id, type_name = %layer.url, error = %e, "layer import failed");
            outcome.error = Some(e.to_string());
        }
        outcome
    }

    async fn fill_layer(
        &self,
        workspace: &str,
        layer: &MapLayer,
        outcome: &mut LayerImport,
    ) -> Result<(), DomainError> {
        let fetched = self.source.fetch(workspace, &layer.url).await?;
        outcome.fetched = fetched.len() as u64;

        let rows = feature_rows(layer.id, fetched);
        outcome.inserted = self.repo.insert_features_skip_duplicates(rows).await?;
        outcome.skipped = outcome.fetched.saturating_sub(outcome.inserted);
        debug!(
            layer_id = layer.id,
            fetched = outcome.fetched,
            inserted = outcome.inserted,
            "layer imported"
        );
        Ok(())
    }
}

/// GeoServer workspace names become a URL path segment.
fn validate_workspace(workspace: &str) -> Result<&str, DomainError> {
    let workspace = workspace.trim();
    if workspace.is_empty() {
        return Err(DomainError::validation("workspace", "must not be empty"));
    }
    if !workspace
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(DomainError::validation(
            "workspace",
            "may only contain letters, digits, '_', '-' and '.'",
        ));
    }
    Ok(workspace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_names() {
        assert_eq!(validate_workspace(" hanoi ").unwrap(), "hanoi");
        assert_eq!(validate_workspace("topp_2.x-1").unwrap(), "topp_2.x-1");
        assert!(matches!(
            validate_workspace("  "),
            Err(DomainError::Validation { .. })
        ));
        assert!(matches!(
            validate_workspace("a/b"),
            Err(DomainError::Validation { .. })
        ));
    }
}
