//! Review Model

use serde::{Deserialize, Serialize};

/// Customer feedback entry, append-only
///
/// Reviews are global feedback, not tied to a reservation or slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    /// 1..=5 inclusive
    pub rating: i64,
    pub comment: String,
    pub created_at: i64,
}

/// Create review payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
}

/// Review joined with its author's username
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReviewWithAuthor {
    pub id: i64,
    pub username: String,
    pub rating: i64,
    pub comment: String,
    pub created_at: i64,
}

/// Review as returned by the API (`created_at` rendered as ISO-8601)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewView {
    pub id: i64,
    pub username: String,
    pub rating: i64,
    pub comment: String,
    pub created_at: String,
}

impl From<&ReviewWithAuthor> for ReviewView {
    fn from(row: &ReviewWithAuthor) -> Self {
        Self {
            id: row.id,
            username: row.username.clone(),
            rating: row.rating,
            comment: row.comment.clone(),
            created_at: crate::util::millis_to_iso(row.created_at),
        }
    }
}
