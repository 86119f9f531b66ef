use async_trait::async_trait;

use super::model::{NewRestaurant, PageRequest, Restaurant, RestaurantPatch};

/// Persistence port for restaurants.
///
/// `update` and `delete` return `None` when no row has the given id.
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    async fn list(&self, page: Option<PageRequest>) -> anyhow::Result<Vec<Restaurant>>;

    /// Case-insensitive substring match on the name.
    async fn search_by_name(&self, fragment: &str) -> anyhow::Result<Vec<Restaurant>>;

    async fn insert(&self, new: NewRestaurant) -> anyhow::Result<Restaurant>;

    async fn update(&self, id: i32, patch: RestaurantPatch) -> anyhow::Result<Option<Restaurant>>;

    async fn delete(&self, id: i32) -> anyhow::Result<Option<Restaurant>>;
}
