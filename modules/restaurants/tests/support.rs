#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use restaurants::domain::model::{NewRestaurant, PageRequest, Restaurant, RestaurantPatch};
use restaurants::domain::repo::RestaurantRepository;
use restaurants::{RestaurantsConfig, Service};
use serde_json::Value;
use tower::ServiceExt as _;
use webgis_geojson::Geometry;

/// Repository double that applies the same coalesce rules as the SQL one.
#[derive(Default)]
pub struct InMemoryRepo {
    rows: Mutex<Vec<Restaurant>>,
}

#[async_trait]
impl RestaurantRepository for InMemoryRepo {
    async fn list(&self, page: Option<PageRequest>) -> anyhow::Result<Vec<Restaurant>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(match page {
            None => rows,
            Some(p) => rows
                .into_iter()
                .skip(usize::try_from(p.offset)?)
                .take(usize::try_from(p.limit)?)
                .collect(),
        })
    }

    async fn search_by_name(&self, fragment: &str) -> anyhow::Result<Vec<Restaurant>> {
        let needle = fragment.to_lowercase();
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn insert(&self, new: NewRestaurant) -> anyhow::Result<Restaurant> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let row = Restaurant {
            id,
            name: new.name,
            geometry: Some(Geometry::point(new.location)),
            cuisine: new.cuisine,
            addr_street: new.addr_street,
            addr_housenumber: new.addr_housenumber,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, patch: RestaurantPatch) -> anyhow::Result<Option<Restaurant>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            row.name = name;
        }
        if let Some(location) = patch.location {
            row.geometry = Some(Geometry::point(location));
        }
        if let Some(cuisine) = patch.cuisine {
            row.cuisine = Some(cuisine);
        }
        if let Some(street) = patch.addr_street {
            row.addr_street = Some(street);
        }
        if let Some(number) = patch.addr_housenumber {
            row.addr_housenumber = Some(number);
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i32) -> anyhow::Result<Option<Restaurant>> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .position(|r| r.id == id)
            .map(|idx| rows.remove(idx)))
    }
}

pub fn app() -> Router {
    let repo = Arc::new(InMemoryRepo::default());
    let svc = Arc::new(Service::new(repo, RestaurantsConfig::default()));
    restaurants::router(svc)
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
