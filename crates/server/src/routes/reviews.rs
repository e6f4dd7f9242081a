use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use service::review::domain::Recommendation;
use service::review::{NewReview, ReviewView};
use service::token::Principal;

use super::auth::ServerState;
use crate::errors::JsonApiError;

#[utoipa::path(get, path = "/counselors/{id}/reviews", tag = "review",
    params(("id" = Uuid, Path, description = "Counselor id")),
    responses((status = 200, description = "Reviews, newest first"), (status = 404, description = "Not found counselor")))]
pub async fn list(State(state): State<ServerState>, Path(counselor_id): Path<Uuid>) -> Result<Json<Vec<ReviewView>>, JsonApiError> {
    Ok(Json(state.services.reviews.list_reviews(counselor_id).await?))
}

#[utoipa::path(post, path = "/counselors/{id}/reviews", tag = "review", security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Counselor id")),
    request_body = crate::openapi::NewReviewRequest,
    responses((status = 201, description = "Created"), (status = 400, description = "Bad Request"), (status = 404, description = "Not found counselor")))]
pub async fn write(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(counselor_id): Path<Uuid>,
    Json(input): Json<NewReview>,
) -> Result<(StatusCode, Json<ReviewView>), JsonApiError> {
    let review = state.services.reviews.write_review(&principal, counselor_id, input).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

#[utoipa::path(post, path = "/reviews/{id}/recommend", tag = "review", security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Review id")),
    responses((status = 200, description = "New recommendation count"), (status = 404, description = "Review not found")))]
pub async fn recommend(State(state): State<ServerState>, Path(review_id): Path<Uuid>) -> Result<Json<Recommendation>, JsonApiError> {
    Ok(Json(state.services.reviews.recommend(review_id).await?))
}
