//! Reservation API Handlers
//!
//! Thin HTTP layer over the reservation ledger; every state transition
//! happens inside the ledger's transactions.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::reservation;
use crate::utils::{ApiResponse, AppResult};
use shared::models::{BookRequest, ReservationView};

#[derive(Serialize)]
pub struct BookResponse {
    pub ok: bool,
    pub reservation_id: i64,
}

/// POST /api/reservations - book a slot for the current user
pub async fn book(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<BookRequest>,
) -> AppResult<Json<BookResponse>> {
    let booked =
        reservation::book(&state.pool, user.id, req.table_slot_id, req.party_size).await?;

    tracing::info!(
        reservation_id = booked.id,
        user_id = user.id,
        slot_id = req.table_slot_id,
        party_size = req.party_size,
        "Reservation booked"
    );

    Ok(Json(BookResponse {
        ok: true,
        reservation_id: booked.id,
    }))
}

/// GET /api/reservations/me - the current user's reservations
///
/// Returns active and cancelled entries joined with slot data, newest
/// first; the UI decides any display filtering.
pub async fn mine(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<ReservationView>>> {
    let rows = reservation::list_by_user(
        &state.pool,
        user.id,
        state.config.history_include_cancelled,
    )
    .await?;
    Ok(Json(rows.iter().map(ReservationView::from).collect()))
}

/// DELETE /api/reservations/{id} - cancel an owned reservation
pub async fn cancel(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    reservation::cancel(
        &state.pool,
        user.id,
        id,
        state.config.cancel_window_minutes,
    )
    .await?;

    tracing::info!(reservation_id = id, user_id = user.id, "Reservation cancelled");

    Ok(Json(ApiResponse::ok()))
}
