use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use super::error::DomainError;
use super::model::{NewRestaurant, PageRequest, Restaurant, RestaurantPatch};
use super::repo::RestaurantRepository;
use crate::config::RestaurantsConfig;

/// Restaurant use cases on top of a [`RestaurantRepository`].
pub struct Service {
    repo: Arc<dyn RestaurantRepository>,
    config: RestaurantsConfig,
}

impl Service {
    pub fn new(repo: Arc<dyn RestaurantRepository>, config: RestaurantsConfig) -> Self {
        Self { repo, config }
    }

    /// Lists restaurants by name. Without `page` and `per_page` every row is returned.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        page: Option<u64>,
        per_page: Option<u64>,
    ) -> Result<Vec<Restaurant>, DomainError> {
        let window = self.page_request(page, per_page)?;
        let rows = self.repo.list(window).await.map_err(storage_failure)?;
        debug!(count = rows.len(), "listed restaurants");
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Restaurant>, DomainError> {
        let rows = self
            .repo
            .search_by_name(name)
            .await
            .map_err(storage_failure)?;
        if rows.is_empty() {
            return Err(DomainError::NoMatch {
                name: name.to_owned(),
            });
        }
        debug!(count = rows.len(), "found restaurants by name");
        Ok(rows)
    }

    #[instrument(skip(self, new), fields(name = %new.name))]
    pub async fn create(&self, new: NewRestaurant) -> Result<Restaurant, DomainError> {
        let created = self.repo.insert(new).await.map_err(storage_failure)?;
        info!(restaurant_id = created.id, "restaurant created");
        Ok(created)
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i32, patch: RestaurantPatch) -> Result<Restaurant, DomainError> {
        if patch.is_empty() {
            debug!("empty patch, stored values are kept");
        }
        let updated = self
            .repo
            .update(id, patch)
            .await
            .map_err(storage_failure)?
            .ok_or_else(|| DomainError::not_found(id))?;
        info!(restaurant_id = id, "restaurant updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<Restaurant, DomainError> {
        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(storage_failure)?
            .ok_or_else(|| DomainError::not_found(id))?;
        info!(restaurant_id = id, "restaurant deleted");
        Ok(deleted)
    }

    fn page_request(
        &self,
        page: Option<u64>,
        per_page: Option<u64>,
    ) -> Result<Option<PageRequest>, DomainError> {
        if page.is_none() && per_page.is_none() {
            return Ok(None);
        }
        let page = page.unwrap_or(1);
        if page == 0 {
            return Err(DomainError::validation("page", "pages start at 1"));
        }
        let max = self.config.max_page_size.max(1);
        let limit = per_page.unwrap_or(max).clamp(1, max);
        Ok(Some(PageRequest {
            limit,
            offset: (page - 1).saturating_mul(limit),
        }))
    }
}

fn storage_failure(e: anyhow::Error) -> DomainError {
    error!(error = %e, "restaurant storage failure");
    DomainError::database(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingRepo {
        pages: Mutex<Vec<Option<PageRequest>>>,
    }

    #[async_trait]
    impl RestaurantRepository for RecordingRepo {
        async fn list(&self, page: Option<PageRequest>) -> anyhow::Result<Vec<Restaurant>> {
            self.pages.lock().unwrap().push(page);
            Ok(vec![])
        }

        async fn search_by_name(&self, _fragment: &str) -> anyhow::Result<Vec<Restaurant>> {
            Ok(vec![])
        }

        async fn insert(&self, _new: NewRestaurant) -> anyhow::Result<Restaurant> {
            anyhow::bail!("connection reset")
        }

        async fn update(
            &self,
            _id: i32,
            _patch: RestaurantPatch,
        ) -> anyhow::Result<Option<Restaurant>> {
            Ok(None)
        }

        async fn delete(&self, _id: i32) -> anyhow::Result<Option<Restaurant>> {
            Ok(None)
        }
    }

    fn service(max_page_size: u64) -> (Arc<RecordingRepo>, Service) {
        let repo = Arc::new(RecordingRepo::default());
        let svc = Service::new(repo.clone(), RestaurantsConfig { max_page_size });
        (repo, svc)
    }

    #[tokio::test]
    async fn listing_without_paging_fetches_everything() {
        let (repo, svc) = service(1000);
        svc.list(None, None).await.unwrap();
        assert_eq!(repo.pages.lock().unwrap().as_slice(), &[None]);
    }

    #[tokio::test]
    async fn per_page_is_clamped_to_configured_maximum() {
        let (repo, svc) = service(50);
        svc.list(Some(3), Some(500)).await.unwrap();
        assert_eq!(
            repo.pages.lock().unwrap().as_slice(),
            &[Some(PageRequest {
                limit: 50,
                offset: 100
            })]
        );
    }

    #[tokio::test]
    async fn page_zero_is_rejected() {
        let (_, svc) = service(50);
        let err = svc.list(Some(0), None).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "page"));
    }

    #[tokio::test]
    async fn empty_search_result_is_not_found() {
        let (_, svc) = service(50);
        let err = svc.find_by_name("nothing").await.unwrap_err();
        assert!(matches!(err, DomainError::NoMatch { .. }));
    }

    #[tokio::test]
    async fn unknown_id_on_update_and_delete_is_not_found() {
        let (_, svc) = service(50);
        let err = svc.update(7, RestaurantPatch::default()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 7 }));
        let err = svc.delete(999).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 999 }));
    }

    #[tokio::test]
    async fn storage_errors_become_internal() {
        let (_, svc) = service(50);
        let new = NewRestaurant {
            name: "Pho 24".to_owned(),
            location: webgis_geojson::Wgs84Point::new(10.77, 106.70).unwrap(),
            cuisine: None,
            addr_street: None,
            addr_housenumber: None,
        };
        let err = svc.create(new).await.unwrap_err();
        assert_eq!(err.kind(), webgis_errors::ErrorKind::Internal);
    }
}
