/// Reservation endpoints
///
/// - `GET /api/reservations?limit=10` - The session user's reservations, earliest first

use crate::{
    app::{AppState, Session},
    error::ApiResult,
};
use axum::{
    extract::{Query, State},
    Extension, Json,
};
use lightbnb_shared::models::{
    property_filter::DEFAULT_LIMIT,
    reservation::{GuestReservation, Reservation},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReservationsResponse {
    pub reservations: Vec<GuestReservation>,
}

/// Lists the session user's reservations
pub async fn list_reservations(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<ReservationsResponse>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    let reservations = Reservation::list_for_guest(&state.db, session.user_id, limit).await?;

    Ok(Json(ReservationsResponse { reservations }))
}
