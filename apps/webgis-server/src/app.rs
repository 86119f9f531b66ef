use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::field::Empty;
use uuid::Uuid;

use crate::config::{AppConfig, ServerConfig};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Services of every module, wired over one connection pool.
pub struct Modules {
    pub restaurants: Arc<restaurants::Service>,
    pub accounts: Arc<accounts::Service>,
    pub map_layers: Arc<map_layers::Service>,
}

impl Modules {
    /// # Errors
    /// Returns an error if the WFS client cannot be built from `geoserver`.
    pub fn new(cfg: &AppConfig, db: &Arc<DatabaseConnection>) -> anyhow::Result<Self> {
        let restaurants = restaurants::Service::new(
            Arc::new(restaurants::SqlRestaurantRepository::new(Arc::clone(db))),
            cfg.restaurants.clone(),
        );
        let accounts = accounts::Service::new(
            Arc::new(accounts::SeaOrmUsersRepository::new(Arc::clone(db))),
            accounts::PasswordHasher::new(),
        );
        let wfs = map_layers::WfsClient::new(&cfg.geoserver).context("geoserver")?;
        let map_layers = map_layers::Service::new(
            Arc::new(map_layers::SeaOrmMapLayersRepository::new(Arc::clone(db))),
            Arc::new(wfs),
        );
        Ok(Self {
            restaurants: Arc::new(restaurants),
            accounts: Arc::new(accounts),
            map_layers: Arc::new(map_layers),
        })
    }
}

/// Applies every module's migrations. Restaurants need PostgreSQL with PostGIS.
///
/// # Errors
/// Returns the first migration failure.
pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
    accounts::Migrator::up(db, None)
        .await
        .context("accounts migrations failed")?;
    map_layers::Migrator::up(db, None)
        .await
        .context("map layer migrations failed")?;
    restaurants::Migrator::up(db, None)
        .await
        .context("restaurant migrations failed")?;
    tracing::info!("Database schema is up to date");
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn fallback(uri: axum::http::Uri) -> impl IntoResponse {
    webgis_errors::not_found(format!("No route for {}", uri.path())).with_instance(uri.path())
}

#[derive(Clone, Copy, Default)]
struct MakeReqId;

impl MakeRequestId for MakeReqId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::now_v7().to_string())
            .ok()
            .map(RequestId::new)
    }
}

fn with_trace_layer(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &Request<axum::body::Body>| {
                let rid = req
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    version = ?req.version(),
                    request_id = %rid,
                    status = Empty,
                    latency_ms = Empty,
                )
            })
            .on_response(
                |res: &axum::http::Response<axum::body::Body>,
                 latency: Duration,
                 span: &tracing::Span| {
                    span.record("status", res.status().as_u16());
                    span.record("latency_ms", latency.as_millis());
                },
            ),
    )
}

/// Wraps the routes in the HTTP middleware stack. At runtime requests flow
/// `SetRequestId` -> `PropagateRequestId` -> Trace -> Timeout -> `BodyLimit` -> CORS.
pub fn with_middleware(mut router: Router, cfg: &ServerConfig) -> Router {
    if cfg.cors_enabled {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router = router.layer(RequestBodyLimitLayer::new(cfg.body_limit_bytes));
    router = router.layer(DefaultBodyLimit::max(cfg.body_limit_bytes));

    router = router.layer(TimeoutLayer::with_status_code(
        StatusCode::GATEWAY_TIMEOUT,
        Duration::from_secs(cfg.request_timeout_secs),
    ));

    router = with_trace_layer(router);

    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
    router.layer(SetRequestIdLayer::new(x_request_id, MakeReqId))
}

pub fn build_router(cfg: &ServerConfig, modules: Modules) -> Router {
    let routes = Router::new()
        .route("/health", get(health))
        .merge(restaurants::router(modules.restaurants))
        .merge(accounts::router(modules.accounts))
        .merge(map_layers::router(modules.map_layers))
        .fallback(fallback);
    with_middleware(routes, cfg)
}
