use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use service::bookmark::{Bookmark, BookmarkView};
use service::token::Principal;

use super::auth::ServerState;
use crate::errors::JsonApiError;

#[utoipa::path(post, path = "/counselors/{id}/bookmark", tag = "bookmark", security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Counselor id")),
    responses((status = 201, description = "Bookmarked"), (status = 404, description = "Unknown account or counselor"), (status = 409, description = "Already bookmarked")))]
pub async fn add(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(counselor_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Bookmark>), JsonApiError> {
    let bookmark = state.services.bookmarks.add_bookmark(&principal, counselor_id).await?;
    Ok((StatusCode::CREATED, Json(bookmark)))
}

#[utoipa::path(delete, path = "/counselors/{id}/bookmark", tag = "bookmark", security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Counselor id")),
    responses((status = 204, description = "Removed"), (status = 404, description = "No such bookmark")))]
pub async fn remove(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(counselor_id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    state.services.bookmarks.remove_bookmark(&principal, counselor_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/bookmarks", tag = "bookmark", security(("bearer" = [])),
    responses((status = 200, description = "Bookmarks, newest first")))]
pub async fn list(State(state): State<ServerState>, Extension(principal): Extension<Principal>) -> Result<Json<Vec<BookmarkView>>, JsonApiError> {
    Ok(Json(state.services.bookmarks.list_bookmarks(&principal).await?))
}
