use axum::{extract::State, http::StatusCode, Extension, Json};

use service::reservation::{CreateReservationInput, ReservationView};
use service::token::Principal;

use super::auth::ServerState;
use crate::errors::JsonApiError;

#[utoipa::path(post, path = "/reservation/create", tag = "reservation", security(("bearer" = [])),
    request_body = crate::openapi::CreateReservationRequest,
    responses((status = 200, description = "Status text", body = String), (status = 400, description = "Bad Request"), (status = 409, description = "Slot taken")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Json(input): Json<CreateReservationInput>,
) -> Result<(StatusCode, &'static str), JsonApiError> {
    let status = state.services.reservations.create_reservation(&principal, input).await?;
    Ok((StatusCode::OK, status))
}

#[utoipa::path(get, path = "/reservation", tag = "reservation", security(("bearer" = [])),
    responses((status = 200, description = "Reservations by date then time")))]
pub async fn list(State(state): State<ServerState>, Extension(principal): Extension<Principal>) -> Result<Json<Vec<ReservationView>>, JsonApiError> {
    Ok(Json(state.services.reservations.get_reservations(&principal).await?))
}
