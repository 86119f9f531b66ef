use std::sync::Arc;

use axum::Json;
use axum::extract::Extension;
use axum::http::Uri;
use uuid::Uuid;
use webgis_errors::{Problem, ValidJson, ValidPath};

use super::dto::{
    ActivationReq, LoginReq, ProfileDto, RegisterReq, UpdateProfileReq, UpsertUserReq, UserDto,
};
use super::error::domain_error_to_problem;
use crate::domain::error::DomainError;
use crate::domain::model::ProfileFields;
use crate::domain::service::{Registration, Service, UserUpsert};

pub type ApiResult<T> = Result<T, Problem>;

fn problem(uri: &Uri) -> impl Fn(DomainError) -> Problem + '_ {
    move |e| domain_error_to_problem(&e, uri.path())
}

pub async fn register(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    ValidJson(req): ValidJson<RegisterReq>,
) -> ApiResult<Json<UserDto>> {
    let registration = Registration::try_from(req).map_err(problem(&uri))?;
    let user = svc.register(registration).await.map_err(problem(&uri))?;
    Ok(Json(user.into()))
}

pub async fn login(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    ValidJson(req): ValidJson<LoginReq>,
) -> ApiResult<Json<UserDto>> {
    let (email, password) = req.into_parts().map_err(problem(&uri))?;
    let user = svc.login(&email, password).await.map_err(problem(&uri))?;
    Ok(Json(user.into()))
}

pub async fn login_google(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    ValidJson(req): ValidJson<RegisterReq>,
) -> ApiResult<Json<UserDto>> {
    let registration = Registration::try_from(req).map_err(problem(&uri))?;
    let user = svc.login_google(registration).await.map_err(problem(&uri))?;
    Ok(Json(user.into()))
}

pub async fn list_users(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
) -> ApiResult<Json<Vec<UserDto>>> {
    let users = svc.list_users().await.map_err(problem(&uri))?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

pub async fn upsert_user(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    ValidJson(req): ValidJson<UpsertUserReq>,
) -> ApiResult<Json<UserDto>> {
    let upsert = UserUpsert::try_from(req).map_err(problem(&uri))?;
    let user = svc.upsert(upsert).await.map_err(problem(&uri))?;
    Ok(Json(user.into()))
}

pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    ValidPath(id): ValidPath<Uuid>,
    uri: Uri,
) -> ApiResult<Json<UserDto>> {
    let user = svc.get_user(id).await.map_err(problem(&uri))?;
    Ok(Json(user.into()))
}

pub async fn find_user_by_email(
    Extension(svc): Extension<Arc<Service>>,
    ValidPath(email): ValidPath<String>,
    uri: Uri,
) -> ApiResult<Json<UserDto>> {
    let user = svc.find_by_email(&email).await.map_err(problem(&uri))?;
    Ok(Json(user.into()))
}

pub async fn set_activation(
    Extension(svc): Extension<Arc<Service>>,
    ValidPath(id): ValidPath<Uuid>,
    uri: Uri,
    ValidJson(req): ValidJson<ActivationReq>,
) -> ApiResult<Json<UserDto>> {
    let activate = req
        .activate
        .ok_or_else(|| DomainError::validation("activate", "is required"))
        .map_err(problem(&uri))?;
    let user = svc
        .set_activation(id, activate)
        .await
        .map_err(problem(&uri))?;
    Ok(Json(user.into()))
}

pub async fn delete_user(
    Extension(svc): Extension<Arc<Service>>,
    ValidPath(id): ValidPath<Uuid>,
    uri: Uri,
) -> ApiResult<Json<UserDto>> {
    let user = svc.delete_user(id).await.map_err(problem(&uri))?;
    Ok(Json(user.into()))
}

pub async fn list_profiles(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
) -> ApiResult<Json<Vec<ProfileDto>>> {
    let profiles = svc.list_profiles().await.map_err(problem(&uri))?;
    Ok(Json(profiles.into_iter().map(Into::into).collect()))
}

pub async fn get_profile(
    Extension(svc): Extension<Arc<Service>>,
    ValidPath(id): ValidPath<Uuid>,
    uri: Uri,
) -> ApiResult<Json<ProfileDto>> {
    let profile = svc.get_profile(id).await.map_err(problem(&uri))?;
    Ok(Json(profile.into()))
}

pub async fn update_profile(
    Extension(svc): Extension<Arc<Service>>,
    ValidPath(id): ValidPath<Uuid>,
    uri: Uri,
    ValidJson(req): ValidJson<UpdateProfileReq>,
) -> ApiResult<Json<ProfileDto>> {
    let patch: ProfileFields = req
        .profile
        .ok_or_else(|| DomainError::validation("profile", "is required"))
        .map_err(problem(&uri))?
        .into();
    let profile = svc
        .update_profile(id, patch)
        .await
        .map_err(problem(&uri))?;
    Ok(Json(profile.into()))
}
