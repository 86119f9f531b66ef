#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use map_layers::domain::source::{FeatureSource, SourceError, SourceFeature};
use map_layers::{Migrator, SeaOrmMapLayersRepository, Service};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt as _;

/// Canned features per `typeName`; a missing type name answers with HTTP 503.
#[derive(Default)]
pub struct FakeSource {
    pub layers: HashMap<String, Vec<SourceFeature>>,
}

impl FakeSource {
    pub fn with(mut self, type_name: &str, ids: &[Option<&str>]) -> Self {
        let features = ids
            .iter()
            .map(|id| SourceFeature {
                id: id.map(str::to_owned),
                properties: Some(serde_json::json!({"source": type_name})),
            })
            .collect();
        self.layers.insert(type_name.to_owned(), features);
        self
    }
}

#[async_trait]
impl FeatureSource for FakeSource {
    async fn fetch(
        &self,
        _workspace: &str,
        type_name: &str,
    ) -> Result<Vec<SourceFeature>, SourceError> {
        self.layers
            .get(type_name)
            .cloned()
            .ok_or(SourceError::Status(503))
    }
}

/// Fresh in-memory SQLite database with the map layer schema applied.
pub async fn inmem_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub async fn app_with(source: FakeSource) -> (Router, Arc<DatabaseConnection>) {
    let db = Arc::new(inmem_db().await);
    let repo = Arc::new(SeaOrmMapLayersRepository::new(Arc::clone(&db)));
    let svc = Arc::new(Service::new(repo, Arc::new(source)));
    (map_layers::router(svc), db)
}

pub async fn app() -> (Router, Arc<DatabaseConnection>) {
    app_with(FakeSource::default()).await
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            req = req.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.clone().oneshot(req.body(body).unwrap()).await.unwrap()
}

pub async fn json_body(resp: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
