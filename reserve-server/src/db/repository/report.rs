//! Reporting queries
//!
//! Read-only aggregate counts over reservations joined to their slots.
//! Historic behavior counts every reservation row in the window, any
//! status; callers pass `include_cancelled = false` to restrict to
//! active bookings.

use super::RepoResult;
use sqlx::SqlitePool;

/// Count reservations whose slot time falls in `[start, end)` (UTC millis)
pub async fn count_in_range(
    pool: &SqlitePool,
    start: i64,
    end: i64,
    include_cancelled: bool,
) -> RepoResult<i64> {
    let mut sql = String::from(
        "SELECT COUNT(*) \
         FROM reservation r \
         JOIN table_slot s ON r.table_slot_id = s.id \
         WHERE s.date_time >= ? AND s.date_time < ?",
    );
    if !include_cancelled {
        sql.push_str(" AND r.status = 'active'");
    }

    let count: i64 = sqlx::query_scalar(&sql)
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await?;
    Ok(count)
}
