use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use service::counselor::domain::{CounselorFilter, CounselorProfile, CounselorView, NewCounselor};

use super::auth::ServerState;
use crate::errors::JsonApiError;

#[utoipa::path(get, path = "/counselors", tag = "counselor",
    params(("field" = Option<String>, Query, description = "Exact counseling field"), ("keyword" = Option<String>, Query, description = "Name substring")),
    responses((status = 200, description = "Counselors ordered by name")))]
pub async fn list(State(state): State<ServerState>, Query(filter): Query<CounselorFilter>) -> Result<Json<Vec<CounselorView>>, JsonApiError> {
    Ok(Json(state.services.counselors.list(&filter).await?))
}

#[utoipa::path(post, path = "/counselors", tag = "counselor", security(("bearer" = [])),
    request_body = crate::openapi::NewCounselorRequest,
    responses((status = 201, description = "Created"), (status = 400, description = "Bad Request")))]
pub async fn create(State(state): State<ServerState>, Json(input): Json<NewCounselor>) -> Result<(StatusCode, Json<CounselorProfile>), JsonApiError> {
    let profile = state.services.counselors.create(input).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

#[utoipa::path(get, path = "/counselors/{id}", tag = "counselor",
    params(("id" = Uuid, Path, description = "Counselor id")),
    responses((status = 200, description = "Counselor profile"), (status = 404, description = "Not found counselor")))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<CounselorProfile>, JsonApiError> {
    Ok(Json(state.services.counselors.get(id).await?))
}
