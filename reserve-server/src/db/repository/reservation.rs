//! Reservation Ledger
//!
//! The state machine binding table slots to reservations. A slot moves
//! Open -> Booked when a booking commits and back to Open only through
//! an explicit cancellation; slots are never auto-expired by time.
//!
//! Both mutations run inside `BEGIN IMMEDIATE` transactions. IMMEDIATE
//! takes the database write lock before the snapshot, so concurrent
//! mutations serialize at BEGIN: the loser waits (bounded by
//! busy_timeout), then reads the winner's committed state and fails
//! with a clean conflict instead of a mid-transaction stale-snapshot
//! abort. If the lock cannot be acquired within busy_timeout the caller
//! sees a retryable `StoreBusy` error. A dropped transaction rolls back,
//! so the slot flag and the reservation row always move together.

use super::{RepoError, RepoResult};
use shared::models::{Reservation, ReservationStatus, ReservationWithSlot, TableSlot};
use shared::{AppError, ErrorCode};
use sqlx::SqlitePool;
use thiserror::Error;

/// Ledger failures, each mapped to a precise error code at the boundary
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("table slot {0} not found")]
    SlotNotFound(i64),

    #[error("table slot {0} is already booked")]
    SlotAlreadyBooked(i64),

    #[error("party of {party} exceeds capacity {capacity}")]
    PartyTooLarge { party: i64, capacity: i64 },

    #[error("party size must be at least 1")]
    PartyTooSmall,

    #[error("reservation {0} not found")]
    ReservationNotFound(i64),

    #[error("reservation {0} is not active")]
    NotActive(i64),

    #[error("cancellation window closed: cancellation requires {0} minutes of lead time")]
    WindowClosed(i64),

    /// Reservation whose slot row is gone; the store is inconsistent
    /// and the operation must not silently succeed.
    #[error("reservation {reservation} references missing slot {slot}")]
    SlotMissing { reservation: i64, slot: i64 },

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let msg = err.to_string();
        match err {
            LedgerError::SlotNotFound(id) => {
                AppError::with_message(ErrorCode::SlotNotFound, msg).with_detail("slot_id", id)
            }
            LedgerError::SlotAlreadyBooked(id) => {
                AppError::with_message(ErrorCode::SlotAlreadyBooked, msg).with_detail("slot_id", id)
            }
            LedgerError::PartyTooLarge { .. } => {
                AppError::with_message(ErrorCode::PartyTooLarge, msg)
            }
            LedgerError::PartyTooSmall => AppError::with_message(ErrorCode::ValueOutOfRange, msg),
            LedgerError::ReservationNotFound(id) => {
                AppError::with_message(ErrorCode::ReservationNotFound, msg)
                    .with_detail("reservation_id", id)
            }
            LedgerError::NotActive(id) => {
                AppError::with_message(ErrorCode::ReservationNotActive, msg)
                    .with_detail("reservation_id", id)
            }
            LedgerError::WindowClosed(_) => {
                AppError::with_message(ErrorCode::CancelWindowClosed, msg)
            }
            LedgerError::SlotMissing { .. } => AppError::internal(msg),
            LedgerError::Repo(e) => e.into(),
        }
    }
}

/// Book a slot for a user: flip `is_booked` and insert the active
/// reservation as one atomic unit.
///
/// Exactly one of any set of concurrent calls for the same open slot
/// succeeds; the rest receive `SlotAlreadyBooked`. An oversized party
/// is reported as such whether or not the slot is free.
pub async fn book(
    pool: &SqlitePool,
    user_id: i64,
    slot_id: i64,
    party_size: i64,
) -> Result<Reservation, LedgerError> {
    if party_size < 1 {
        return Err(LedgerError::PartyTooSmall);
    }

    let mut tx = pool
        .begin_with("BEGIN IMMEDIATE")
        .await
        .map_err(RepoError::from)?;

    let slot: Option<TableSlot> = sqlx::query_as(
        "SELECT id, date_time, capacity, area, price_per_person, features, is_booked \
         FROM table_slot WHERE id = ?",
    )
    .bind(slot_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(RepoError::from)?;

    let slot = slot.ok_or(LedgerError::SlotNotFound(slot_id))?;

    // Capacity is checked before availability so an oversized party is
    // always reported as such, booked slot or not.
    if party_size > slot.capacity {
        return Err(LedgerError::PartyTooLarge {
            party: party_size,
            capacity: slot.capacity,
        });
    }
    if slot.is_booked {
        return Err(LedgerError::SlotAlreadyBooked(slot_id));
    }

    // Guarded flip. We hold the write lock, so this cannot lose a race;
    // the guard stays anyway so a zero-row update is loudly a conflict.
    let rows = sqlx::query("UPDATE table_slot SET is_booked = 1 WHERE id = ? AND is_booked = 0")
        .bind(slot_id)
        .execute(&mut *tx)
        .await
        .map_err(RepoError::from)?;
    if rows.rows_affected() == 0 {
        return Err(LedgerError::SlotAlreadyBooked(slot_id));
    }

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO reservation (id, user_id, table_slot_id, party_size, status, created_at) \
         VALUES (?1, ?2, ?3, ?4, 'active', ?5)",
    )
    .bind(id)
    .bind(user_id)
    .bind(slot_id)
    .bind(party_size)
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(|e| match RepoError::from(e) {
        // The partial unique index on active reservations fired: the
        // constraint-level backstop for the flag flip above.
        RepoError::Duplicate(_) => LedgerError::SlotAlreadyBooked(slot_id),
        other => LedgerError::Repo(other),
    })?;

    tx.commit().await.map_err(RepoError::from)?;

    Ok(Reservation {
        id,
        user_id,
        table_slot_id: slot_id,
        party_size,
        status: ReservationStatus::Active,
        created_at: now,
    })
}

/// Cancel a reservation: flip it to `cancelled` and reopen the slot as
/// one atomic unit.
///
/// Only the owning user may cancel; non-owners get the same not-found
/// error as a missing id so existence is not leaked. Cancellation is
/// refused inside the cutoff window before the slot time.
pub async fn cancel(
    pool: &SqlitePool,
    user_id: i64,
    reservation_id: i64,
    window_minutes: i64,
) -> Result<(), LedgerError> {
    let mut tx = pool
        .begin_with("BEGIN IMMEDIATE")
        .await
        .map_err(RepoError::from)?;

    let reservation: Option<Reservation> = sqlx::query_as(
        "SELECT id, user_id, table_slot_id, party_size, status, created_at \
         FROM reservation WHERE id = ?",
    )
    .bind(reservation_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(RepoError::from)?;

    let reservation = reservation
        .filter(|r| r.user_id == user_id)
        .ok_or(LedgerError::ReservationNotFound(reservation_id))?;

    if reservation.status != ReservationStatus::Active {
        return Err(LedgerError::NotActive(reservation_id));
    }

    let slot: Option<TableSlot> = sqlx::query_as(
        "SELECT id, date_time, capacity, area, price_per_person, features, is_booked \
         FROM table_slot WHERE id = ?",
    )
    .bind(reservation.table_slot_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(RepoError::from)?;

    let slot = slot.ok_or(LedgerError::SlotMissing {
        reservation: reservation_id,
        slot: reservation.table_slot_id,
    })?;

    let now = shared::util::now_millis();
    if slot.date_time - now < window_minutes * 60_000 {
        return Err(LedgerError::WindowClosed(window_minutes));
    }

    sqlx::query("UPDATE reservation SET status = 'cancelled' WHERE id = ?")
        .bind(reservation_id)
        .execute(&mut *tx)
        .await
        .map_err(RepoError::from)?;

    sqlx::query("UPDATE table_slot SET is_booked = 0 WHERE id = ?")
        .bind(slot.id)
        .execute(&mut *tx)
        .await
        .map_err(RepoError::from)?;

    tx.commit().await.map_err(RepoError::from)?;

    Ok(())
}

/// All reservations for a user joined with current slot data, newest
/// first. Cancelled entries are kept as history unless filtered out.
pub async fn list_by_user(
    pool: &SqlitePool,
    user_id: i64,
    include_cancelled: bool,
) -> RepoResult<Vec<ReservationWithSlot>> {
    let mut sql = String::from(
        "SELECT r.id, r.table_slot_id, r.party_size, r.status, r.created_at, \
                s.date_time, s.capacity, s.area, s.price_per_person, s.features \
         FROM reservation r \
         JOIN table_slot s ON r.table_slot_id = s.id \
         WHERE r.user_id = ?",
    );
    if !include_cancelled {
        sql.push_str(" AND r.status = 'active'");
    }
    sql.push_str(" ORDER BY r.created_at DESC, r.id DESC");

    let rows = sqlx::query_as::<_, ReservationWithSlot>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reservation>> {
    let row = sqlx::query_as::<_, Reservation>(
        "SELECT id, user_id, table_slot_id, party_size, status, created_at \
         FROM reservation WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
