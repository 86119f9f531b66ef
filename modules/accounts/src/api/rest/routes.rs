use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};

use super::handlers;
use crate::domain::service::Service;

pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/api/register", post(handlers::register))
        .route("/api/login", post(handlers::login))
        .route("/api/login-google", post(handlers::login_google))
        .route(
            "/api/users",
            get(handlers::list_users).post(handlers::upsert_user),
        )
        .route(
            "/api/users/findByEmail/{email}",
            get(handlers::find_user_by_email),
        )
        .route(
            "/api/users/{id}",
            get(handlers::get_user)
                .put(handlers::set_activation)
                .delete(handlers::delete_user),
        )
        .route("/api/profiles", get(handlers::list_profiles))
        .route(
            "/api/profiles/{id}",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .layer(Extension(service))
}
