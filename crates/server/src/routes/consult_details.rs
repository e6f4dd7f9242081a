use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use service::consult_detail::ConsultDetailView;
use service::pagination::{Page, Pagination};
use service::token::Principal;

use super::auth::ServerState;
use crate::errors::JsonApiError;

#[derive(Debug, Deserialize)]
pub struct LatestQuery { pub size: Option<u64> }

#[utoipa::path(get, path = "/consult-detail/latest", tag = "consult-detail", security(("bearer" = [])),
    params(("size" = Option<u64>, Query, description = "How many records (default 3)")),
    responses((status = 200, description = "Most recent consultations")))]
pub async fn latest(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Query(q): Query<LatestQuery>,
) -> Result<Json<Vec<ConsultDetailView>>, JsonApiError> {
    Ok(Json(state.services.consult_details.find_latest(&principal, q.size).await?))
}

#[utoipa::path(get, path = "/consult-detail", tag = "consult-detail", security(("bearer" = [])),
    params(("page" = Option<u32>, Query, description = "1-based page"), ("per_page" = Option<u32>, Query, description = "Page size (1..=100)")),
    responses((status = 200, description = "Page of consultations")))]
pub async fn all(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Query(opts): Query<Pagination>,
) -> Result<Json<Page<ConsultDetailView>>, JsonApiError> {
    Ok(Json(state.services.consult_details.find_all(&principal, opts).await?))
}
