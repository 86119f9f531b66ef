#![allow(dead_code)]

use std::sync::Arc;

use accounts::{Migrator, PasswordHasher, SeaOrmUsersRepository, Service};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt as _;

/// Fresh in-memory SQLite database with the accounts schema applied.
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

pub async fn app() -> (Router, Arc<DatabaseConnection>) {
    let db = Arc::new(inmem_db().await);
    let repo = Arc::new(SeaOrmUsersRepository::new(Arc::clone(&db)));
    let svc = Arc::new(Service::new(repo, PasswordHasher::new()));
    (accounts::router(svc), db)
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
