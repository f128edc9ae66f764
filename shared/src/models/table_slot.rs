//! Table Slot Model

use serde::{Deserialize, Serialize};

/// A bookable table at a specific date/time with fixed capacity and price.
///
/// `is_booked` is the only mutable field: true iff exactly one active
/// reservation holds the slot. Slots are never deleted once created so
/// historical reports stay consistent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TableSlot {
    pub id: i64,
    /// Slot start time (UTC millis)
    pub date_time: i64,
    pub capacity: i64,
    pub area: String,
    pub price_per_person: f64,
    /// Free-form comma separated feature list, e.g. "window, quiet, sofa"
    pub features: String,
    pub is_booked: bool,
}

/// Create table slot payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSlotCreate {
    /// ISO-8601 datetime, naive values are treated as UTC
    pub date_time: String,
    pub capacity: i64,
    pub area: Option<String>,
    pub price_per_person: Option<f64>,
    pub features: Option<String>,
}

/// Slot as returned by the API (`date_time` rendered as ISO-8601)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSlotView {
    pub id: i64,
    pub date_time: String,
    pub capacity: i64,
    pub area: String,
    pub price_per_person: f64,
    pub features: String,
    pub is_booked: bool,
}

impl From<&TableSlot> for TableSlotView {
    fn from(slot: &TableSlot) -> Self {
        Self {
            id: slot.id,
            date_time: crate::util::millis_to_iso(slot.date_time),
            capacity: slot.capacity,
            area: slot.area.clone(),
            price_per_person: slot.price_per_person,
            features: slot.features.clone(),
            is_booked: slot.is_booked,
        }
    }
}
