//! Report API Handlers
//!
//! Read-only aggregate counts over a consistent snapshot of the ledger
//! and catalog. Counts include cancelled reservations by default, per
//! `Config::reports_include_cancelled`.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::AppError;
use crate::core::ServerState;
use crate::db::repository::report;
use crate::utils::AppResult;
use crate::utils::time;
use shared::ErrorCode;

#[derive(Debug, Deserialize)]
pub struct DailyQuery {
    /// YYYY-MM-DD, defaults to today (UTC)
    pub date: Option<String>,
}

#[derive(Serialize)]
pub struct DailyReportResponse {
    pub date: String,
    pub reservations: i64,
}

/// GET /api/reports/daily - reservation count for one calendar day
pub async fn daily(
    State(state): State<ServerState>,
    Query(query): Query<DailyQuery>,
) -> AppResult<Json<DailyReportResponse>> {
    let day = match query.date.as_deref().filter(|d| !d.is_empty()) {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d").map_err(|_| {
            AppError::with_message(ErrorCode::InvalidFormat, format!("invalid date: '{d}'"))
        })?,
        None => time::today_utc(),
    };

    let (start, end) = time::day_range_millis(day);
    let count = report::count_in_range(
        &state.pool,
        start,
        end,
        state.config.reports_include_cancelled,
    )
    .await?;

    Ok(Json(DailyReportResponse {
        date: day.format("%Y-%m-%d").to_string(),
        reservations: count,
    }))
}

#[derive(Serialize)]
pub struct WeeklyReportResponse {
    pub week_start: String,
    pub reservations: i64,
}

/// GET /api/reports/weekly - reservation count for the week containing
/// today, starting on the most recent Monday
pub async fn weekly(State(state): State<ServerState>) -> AppResult<Json<WeeklyReportResponse>> {
    let (monday, start, end) = time::week_range_millis(time::today_utc());
    let count = report::count_in_range(
        &state.pool,
        start,
        end,
        state.config.reports_include_cancelled,
    )
    .await?;

    Ok(Json(WeeklyReportResponse {
        week_start: monday.format("%Y-%m-%d").to_string(),
        reservations: count,
    }))
}
