use std::sync::Arc;

use axum::Json;
use axum::extract::Extension;
use axum::http::{StatusCode, Uri};
use webgis_errors::{Problem, ValidJson, ValidPath};

use super::dto::{
    CreateFeatureReq, CreateMapLayerReq, FeatureDto, MapLayerDto, UpdateFeatureReq,
    UpdateMapLayerReq,
};
use super::error::domain_error_to_problem;
use crate::domain::error::DomainError;
use crate::domain::import::ImportReport;
use crate::domain::model::{Feature, FeaturePatch, MapLayerPatch, NewFeature, NewMapLayer};
use crate::domain::service::Service;

pub type ApiResult<T> = Result<T, Problem>;

fn problem(uri: &Uri) -> impl Fn(DomainError) -> Problem + '_ {
    move |e| domain_error_to_problem(&e, uri.path())
}

fn feature_dtos(features: Vec<Feature>) -> Json<Vec<FeatureDto>> {
    Json(features.into_iter().map(Into::into).collect())
}

pub async fn list_layers(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
) -> ApiResult<Json<Vec<MapLayerDto>>> {
    let layers = svc.list_layers().await.map_err(problem(&uri))?;
    Ok(Json(layers.into_iter().map(Into::into).collect()))
}

pub async fn create_layer(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    ValidJson(req): ValidJson<CreateMapLayerReq>,
) -> ApiResult<(StatusCode, Json<MapLayerDto>)> {
    let new = NewMapLayer::try_from(req).map_err(problem(&uri))?;
    let layer = svc.create_layer(new).await.map_err(problem(&uri))?;
    Ok((StatusCode::CREATED, Json(layer.into())))
}

pub async fn get_layer(
    Extension(svc): Extension<Arc<Service>>,
    ValidPath(id): ValidPath<i32>,
    uri: Uri,
) -> ApiResult<Json<MapLayerDto>> {
    let layer = svc.get_layer(id).await.map_err(problem(&uri))?;
    Ok(Json(layer.into()))
}

pub async fn update_layer(
    Extension(svc): Extension<Arc<Service>>,
    ValidPath(id): ValidPath<i32>,
    uri: Uri,
    ValidJson(req): ValidJson<UpdateMapLayerReq>,
) -> ApiResult<Json<MapLayerDto>> {
    let patch = MapLayerPatch::try_from(req).map_err(problem(&uri))?;
    let layer = svc.update_layer(id, patch).await.map_err(problem(&uri))?;
    Ok(Json(layer.into()))
}

pub async fn delete_layer(
    Extension(svc): Extension<Arc<Service>>,
    ValidPath(id): ValidPath<i32>,
    uri: Uri,
) -> ApiResult<Json<MapLayerDto>> {
    let layer = svc.delete_layer(id).await.map_err(problem(&uri))?;
    Ok(Json(layer.into()))
}

pub async fn layer_features(
    Extension(svc): Extension<Arc<Service>>,
    ValidPath(id): ValidPath<i32>,
    uri: Uri,
) -> ApiResult<Json<Vec<FeatureDto>>> {
    let features = svc.layer_features(id).await.map_err(problem(&uri))?;
    Ok(feature_dtos(features))
}

pub async fn import_features(
    Extension(svc): Extension<Arc<Service>>,
    ValidPath(workspace): ValidPath<String>,
    uri: Uri,
) -> ApiResult<Json<ImportReport>> {
    let report = svc.import(&workspace).await.map_err(problem(&uri))?;
    Ok(Json(report))
}

pub async fn create_feature(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    ValidJson(req): ValidJson<CreateFeatureReq>,
) -> ApiResult<(StatusCode, Json<FeatureDto>)> {
    let new = NewFeature::try_from(req).map_err(problem(&uri))?;
    let feature = svc.create_feature(new).await.map_err(problem(&uri))?;
    Ok((StatusCode::CREATED, Json(feature.into())))
}

pub async fn find_features_by_name(
    Extension(svc): Extension<Arc<Service>>,
    ValidPath(name): ValidPath<String>,
    uri: Uri,
) -> ApiResult<Json<Vec<FeatureDto>>> {
    let features = svc.find_features(&name).await.map_err(problem(&uri))?;
    Ok(feature_dtos(features))
}

pub async fn update_feature(
    Extension(svc): Extension<Arc<Service>>,
    ValidPath(id): ValidPath<i32>,
    uri: Uri,
    ValidJson(req): ValidJson<UpdateFeatureReq>,
) -> ApiResult<Json<FeatureDto>> {
    let patch = FeaturePatch::try_from(req).map_err(problem(&uri))?;
    let feature = svc.update_feature(id, patch).await.map_err(problem(&uri))?;
    Ok(Json(feature.into()))
}

pub async fn delete_feature(
    Extension(svc): Extension<Arc<Service>>,
    ValidPath(id): ValidPath<i32>,
    uri: Uri,
) -> ApiResult<Json<FeatureDto>> {
    let feature = svc.delete_feature(id).await.map_err(problem(&uri))?;
    Ok(Json(feature.into()))
}
