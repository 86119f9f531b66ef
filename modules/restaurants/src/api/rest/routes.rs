use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Router};

use super::handlers;
use crate::domain::service::Service;

/// Restaurant endpoints.
///
/// `GET /api/restaurants/{key}` treats the key as a name fragment while `PUT`
/// and `DELETE` parse it as the numeric id.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route(
            "/api/restaurants",
            get(handlers::list_restaurants).post(handlers::create_restaurant),
        )
        .route(
            "/api/restaurants/{key}",
            get(handlers::get_restaurants_by_name)
                .put(handlers::update_restaurant)
                .delete(handlers::delete_restaurant),
        )
        .layer(Extension(service))
}
