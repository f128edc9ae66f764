//! Review API Handlers

use axum::{Extension, Json, extract::State};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::review;
use crate::utils::AppResult;
use shared::models::{ReviewCreate, ReviewView};

/// GET /api/reviews - newest reviews with author usernames, public
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ReviewView>>> {
    let rows = review::list_recent(&state.pool, review::RECENT_LIMIT).await?;
    Ok(Json(rows.iter().map(ReviewView::from).collect()))
}

#[derive(Serialize)]
pub struct AddReviewResponse {
    pub ok: bool,
    pub id: i64,
}

/// POST /api/reviews - append a review for the current user
pub async fn add(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ReviewCreate>,
) -> AppResult<Json<AddReviewResponse>> {
    let created = review::add(&state.pool, user.id, payload.rating, &payload.comment).await?;

    tracing::info!(
        review_id = created.id,
        user_id = user.id,
        rating = created.rating,
        "Review added"
    );

    Ok(Json(AddReviewResponse {
        ok: true,
        id: created.id,
    }))
}
