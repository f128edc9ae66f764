//! Reservation Model

use serde::{Deserialize, Serialize};

/// Reservation lifecycle status
///
/// Transitions only forward: `active` → `cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum ReservationStatus {
    Active,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Active => "active",
            ReservationStatus::Cancelled => "cancelled",
        }
    }
}

/// A claim on a table slot by a user
///
/// At most one `active` reservation exists per slot at any time; a slot
/// can accumulate any number of cancelled reservations over its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub user_id: i64,
    pub table_slot_id: i64,
    pub party_size: i64,
    pub status: ReservationStatus,
    pub created_at: i64,
}

/// Book request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRequest {
    pub table_slot_id: i64,
    #[serde(default = "default_party_size")]
    pub party_size: i64,
}

fn default_party_size() -> i64 {
    1
}

/// Reservation joined with its slot (flat row for list views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReservationWithSlot {
    pub id: i64,
    pub table_slot_id: i64,
    pub party_size: i64,
    pub status: ReservationStatus,
    pub created_at: i64,
    pub date_time: i64,
    pub capacity: i64,
    pub area: String,
    pub price_per_person: f64,
    pub features: String,
}

/// Reservation entry as returned by `GET /api/reservations/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationView {
    pub id: i64,
    pub slot_id: i64,
    pub date_time: String,
    pub capacity: i64,
    pub area: String,
    pub price_per_person: f64,
    pub features: String,
    pub party_size: i64,
    pub status: ReservationStatus,
}

impl From<&ReservationWithSlot> for ReservationView {
    fn from(row: &ReservationWithSlot) -> Self {
        Self {
            id: row.id,
            slot_id: row.table_slot_id,
            date_time: crate::util::millis_to_iso(row.date_time),
            capacity: row.capacity,
            area: row.area.clone(),
            price_per_person: row.price_per_person,
            features: row.features.clone(),
            party_size: row.party_size,
            status: row.status,
        }
    }
}
