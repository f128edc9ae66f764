//! Table Slot Repository
//!
//! Catalog of bookable slots: filtered search plus staff creation.
//! Booking-state mutation lives in `reservation`, never here.

use super::{RepoError, RepoResult};
use crate::utils::validation::{self, MAX_NAME_LEN};
use shared::models::{TableSlot, TableSlotCreate};
use sqlx::SqlitePool;

const SLOT_SELECT: &str =
    "SELECT id, date_time, capacity, area, price_per_person, features, is_booked FROM table_slot";

const DEFAULT_AREA: &str = "indoor";

/// Search filters, all optional and combined with AND
#[derive(Debug, Clone, Default)]
pub struct SlotFilter {
    /// Exclude booked slots (the customer-facing default)
    pub only_available: bool,
    /// Calendar-day range match (UTC millis, half-open)
    pub day_range: Option<(i64, i64)>,
    /// Exact hour:minute-of-day match
    pub time_of_day: Option<(u32, u32)>,
    /// Minimum capacity
    pub min_size: Option<i64>,
    /// Exact area match
    pub area: Option<String>,
    /// Inclusive price bounds
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    /// Feature terms: a slot matches when its feature string contains
    /// ANY term, case-insensitive
    pub feature_terms: Vec<String>,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<TableSlot>> {
    let sql = format!("{} WHERE id = ?", SLOT_SELECT);
    let row = sqlx::query_as::<_, TableSlot>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Filtered slot search, ordered ascending by date_time.
///
/// The dataset is bounded (one restaurant's slots), so there is no
/// pagination. Conditions and binds are assembled in lockstep.
pub async fn search(pool: &SqlitePool, filter: &SlotFilter) -> RepoResult<Vec<TableSlot>> {
    let mut sql = format!("{} WHERE 1=1", SLOT_SELECT);

    if filter.only_available {
        sql.push_str(" AND is_booked = 0");
    }
    if filter.day_range.is_some() {
        sql.push_str(" AND date_time >= ? AND date_time < ?");
    }
    if filter.time_of_day.is_some() {
        // date_time is UTC millis; strftime wants seconds
        sql.push_str(
            " AND CAST(strftime('%H', date_time / 1000, 'unixepoch') AS INTEGER) = ? \
             AND CAST(strftime('%M', date_time / 1000, 'unixepoch') AS INTEGER) = ?",
        );
    }
    if filter.min_size.is_some() {
        sql.push_str(" AND capacity >= ?");
    }
    if filter.area.is_some() {
        sql.push_str(" AND area = ?");
    }
    if filter.price_min.is_some() {
        sql.push_str(" AND price_per_person >= ?");
    }
    if filter.price_max.is_some() {
        sql.push_str(" AND price_per_person <= ?");
    }
    if !filter.feature_terms.is_empty() {
        let clauses: Vec<&str> = filter
            .feature_terms
            .iter()
            .map(|_| "instr(lower(features), ?) > 0")
            .collect();
        sql.push_str(&format!(" AND ({})", clauses.join(" OR ")));
    }
    sql.push_str(" ORDER BY date_time ASC");

    let mut query = sqlx::query_as::<_, TableSlot>(&sql);
    if let Some((start, end)) = filter.day_range {
        query = query.bind(start).bind(end);
    }
    if let Some((hh, mm)) = filter.time_of_day {
        query = query.bind(hh as i64).bind(mm as i64);
    }
    if let Some(min_size) = filter.min_size {
        query = query.bind(min_size);
    }
    if let Some(area) = &filter.area {
        query = query.bind(area.clone());
    }
    if let Some(price_min) = filter.price_min {
        query = query.bind(price_min);
    }
    if let Some(price_max) = filter.price_max {
        query = query.bind(price_max);
    }
    for term in &filter.feature_terms {
        query = query.bind(term.trim().to_lowercase());
    }

    let slots = query.fetch_all(pool).await?;
    Ok(slots)
}

/// Create a new slot. Always created open (`is_booked = false`).
pub async fn create(pool: &SqlitePool, data: TableSlotCreate) -> RepoResult<TableSlot> {
    let date_time = crate::utils::time::parse_iso_millis(&data.date_time).ok_or_else(|| {
        RepoError::Validation(format!("invalid date_time: '{}'", data.date_time))
    })?;
    if data.capacity < 1 {
        return Err(RepoError::Validation(
            "capacity must be a positive integer".into(),
        ));
    }
    let price = data.price_per_person.unwrap_or(0.0);
    if !price.is_finite() || price < 0.0 {
        return Err(RepoError::Validation(
            "price_per_person must be non-negative".into(),
        ));
    }
    let area = data.area.unwrap_or_else(|| DEFAULT_AREA.to_string());
    let features = data.features.unwrap_or_default();
    validation::validate_required_text(&area, "area", MAX_NAME_LEN)
        .map_err(|e| RepoError::Validation(e.message))?;
    validation::validate_text(&features, "features", validation::MAX_FEATURES_LEN)
        .map_err(|e| RepoError::Validation(e.message))?;

    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO table_slot (id, date_time, capacity, area, price_per_person, features, is_booked) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0)",
    )
    .bind(id)
    .bind(date_time)
    .bind(data.capacity)
    .bind(&area)
    .bind(price)
    .bind(&features)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create table slot".into()))
}
