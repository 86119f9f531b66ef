use std::sync::Arc;

use axum::extract::Extension;
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Json;
use webgis_errors::{Problem, ValidJson, ValidPath, ValidQuery};

use super::dto::{
    CreateRestaurantReq, ListQuery, RestaurantCollection, RestaurantFeature, UpdateRestaurantReq,
};
use super::error::domain_error_to_problem;
use crate::domain::error::DomainError;
use crate::domain::model::{NewRestaurant, RestaurantPatch};
use crate::domain::service::Service;

pub type ApiResult<T> = Result<T, Problem>;

fn problem(uri: &Uri) -> impl Fn(DomainError) -> Problem + '_ {
    move |e| domain_error_to_problem(&e, uri.path())
}

pub async fn list_restaurants(
    Extension(svc): Extension<Arc<Service>>,
    ValidQuery(q): ValidQuery<ListQuery>,
    uri: Uri,
) -> ApiResult<Json<RestaurantCollection>> {
    let rows = svc.list(q.page, q.per_page).await.map_err(problem(&uri))?;
    Ok(Json(rows.into_iter().map(RestaurantFeature::from).collect()))
}

pub async fn get_restaurants_by_name(
    Extension(svc): Extension<Arc<Service>>,
    ValidPath(name): ValidPath<String>,
    uri: Uri,
) -> ApiResult<Json<RestaurantCollection>> {
    let rows = svc.find_by_name(&name).await.map_err(problem(&uri))?;
    Ok(Json(rows.into_iter().map(RestaurantFeature::from).collect()))
}

pub async fn create_restaurant(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    ValidJson(req): ValidJson<CreateRestaurantReq>,
) -> ApiResult<impl IntoResponse> {
    let new = NewRestaurant::try_from(req).map_err(problem(&uri))?;
    let created = svc.create(new).await.map_err(problem(&uri))?;
    Ok((StatusCode::CREATED, Json(RestaurantFeature::from(created))))
}

pub async fn update_restaurant(
    Extension(svc): Extension<Arc<Service>>,
    ValidPath(id): ValidPath<i32>,
    uri: Uri,
    ValidJson(req): ValidJson<UpdateRestaurantReq>,
) -> ApiResult<Json<RestaurantFeature>> {
    let patch = RestaurantPatch::try_from(req).map_err(problem(&uri))?;
    let updated = svc.update(id, patch).await.map_err(problem(&uri))?;
    Ok(Json(updated.into()))
}

pub async fn delete_restaurant(
    Extension(svc): Extension<Arc<Service>>,
    ValidPath(id): ValidPath<i32>,
    uri: Uri,
) -> ApiResult<Json<RestaurantFeature>> {
    let deleted = svc.delete(id).await.map_err(problem(&uri))?;
    Ok(Json(deleted.into()))
}
