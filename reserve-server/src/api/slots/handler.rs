//! Slot Catalog API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::AppError;
use crate::core::ServerState;
use crate::db::repository::slot::{self, SlotFilter};
use crate::utils::AppResult;
use crate::utils::time;
use shared::ErrorCode;
use shared::models::{TableSlotCreate, TableSlotView};

/// Search query parameters; every filter is optional and they combine
/// with AND
#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    /// "true"/"false"; anything else reads as false, absent means true
    pub only_available: Option<String>,
    /// YYYY-MM-DD
    pub date: Option<String>,
    /// HH:MM time-of-day match
    pub time: Option<String>,
    /// Minimum capacity
    pub size: Option<i64>,
    pub area: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    /// Comma-separated terms, slot matches on ANY of them
    pub features: Option<String>,
}

/// GET /api/slots - filtered slot search, public
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<SlotQuery>,
) -> AppResult<Json<Vec<TableSlotView>>> {
    let mut filter = SlotFilter {
        only_available: query
            .only_available
            .as_deref()
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(true),
        min_size: query.size,
        area: query.area.filter(|a| !a.is_empty()),
        price_min: query.price_min,
        price_max: query.price_max,
        ..SlotFilter::default()
    };

    if let Some(date) = query.date.as_deref().filter(|d| !d.is_empty()) {
        let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            AppError::with_message(ErrorCode::InvalidFormat, format!("invalid date: '{date}'"))
        })?;
        filter.day_range = Some(time::day_range_millis(day));
    }

    // An unparseable time filter is ignored rather than rejected
    if let Some(t) = query.time.as_deref() {
        filter.time_of_day = parse_time_of_day(t);
    }

    if let Some(features) = query.features.as_deref() {
        filter.feature_terms = features
            .split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
    }

    let slots = slot::search(&state.pool, &filter).await?;
    Ok(Json(slots.iter().map(TableSlotView::from).collect()))
}

#[derive(Serialize)]
pub struct CreateSlotResponse {
    pub ok: bool,
    pub id: i64,
}

/// POST /api/slots - create a slot (staff only, enforced by the router)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TableSlotCreate>,
) -> AppResult<Json<CreateSlotResponse>> {
    let created = slot::create(&state.pool, payload).await?;

    tracing::info!(
        slot_id = created.id,
        date_time = %created.date_time,
        capacity = created.capacity,
        "Table slot created"
    );

    Ok(Json(CreateSlotResponse {
        ok: true,
        id: created.id,
    }))
}

/// Parse "HH:MM" into an (hour, minute) pair
fn parse_time_of_day(value: &str) -> Option<(u32, u32)> {
    let (hh, mm) = value.split_once(':')?;
    let hh: u32 = hh.trim().parse().ok()?;
    let mm: u32 = mm.trim().parse().ok()?;
    if hh > 23 || mm > 59 {
        return None;
    }
    Some((hh, mm))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("18:30"), Some((18, 30)));
        assert_eq!(parse_time_of_day("0:05"), Some((0, 5)));
        assert_eq!(parse_time_of_day("24:00"), None);
        assert_eq!(parse_time_of_day("18:60"), None);
        assert_eq!(parse_time_of_day("half past six"), None);
        assert_eq!(parse_time_of_day(""), None);
    }
}
