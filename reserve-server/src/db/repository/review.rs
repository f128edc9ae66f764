//! Review Repository
//!
//! Append-only customer feedback; no edit or delete path exists.

use super::{RepoError, RepoResult};
use crate::utils::validation::{self, MAX_COMMENT_LEN};
use shared::models::{Review, ReviewWithAuthor};
use sqlx::SqlitePool;

/// Default page size for the public review feed
pub const RECENT_LIMIT: i64 = 50;

pub async fn add(pool: &SqlitePool, user_id: i64, rating: i64, comment: &str) -> RepoResult<Review> {
    if !(1..=5).contains(&rating) {
        return Err(RepoError::Validation("rating must be 1-5".into()));
    }
    let comment = comment.trim();
    validation::validate_text(comment, "comment", MAX_COMMENT_LEN)
        .map_err(|e| RepoError::Validation(e.message))?;

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO review (id, user_id, rating, comment, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(user_id)
    .bind(rating)
    .bind(comment)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Review {
        id,
        user_id,
        rating,
        comment: comment.to_string(),
        created_at: now,
    })
}

pub async fn list_recent(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<ReviewWithAuthor>> {
    let rows = sqlx::query_as::<_, ReviewWithAuthor>(
        "SELECT rv.id, u.username, rv.rating, rv.comment, rv.created_at \
         FROM review rv \
         JOIN user u ON rv.user_id = u.id \
         ORDER BY rv.created_at DESC, rv.id DESC \
         LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
