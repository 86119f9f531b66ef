use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};

use super::handlers;
use crate::domain::service::Service;

/// Map layer and feature endpoints.
///
/// `GET /api/features/{key}` searches by name fragment; `PUT` and `DELETE`
/// on the same path take the numeric id.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route(
            "/api/mapLayers",
            get(handlers::list_layers).post(handlers::create_layer),
        )
        .route(
            "/api/mapLayers/import/{workspace}",
            post(handlers::import_features),
        )
        .route(
            "/api/mapLayers/{id}",
            get(handlers::get_layer)
                .put(handlers::update_layer)
                .delete(handlers::delete_layer),
        )
        .route(
            "/api/mapLayers/{id}/features",
            get(handlers::layer_features),
        )
        .route("/api/features", post(handlers::create_feature))
        .route(
            "/api/features/{key}",
            get(handlers::find_features_by_name)
                .put(handlers::update_feature)
                .delete(handlers::delete_feature),
        )
        .layer(Extension(service))
}
