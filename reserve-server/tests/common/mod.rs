//! Shared helpers for integration tests
//!
//! Each test gets its own SQLite database under a temp dir; the state
//! is the same one the real server runs with.
#![allow(dead_code)]

use reserve_server::auth;
use reserve_server::core::{Config, ServerState};
use reserve_server::db::repository::{slot, user};
use shared::models::{Role, TableSlot, TableSlotCreate, User};
use sqlx::SqlitePool;

pub struct TestContext {
    pub state: ServerState,
    // Keeps the database directory alive for the test's duration
    _tmp: tempfile::TempDir,
}

pub async fn setup() -> TestContext {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
    let state = ServerState::initialize(&config).await;
    TestContext { state, _tmp: tmp }
}

pub async fn seed_user(pool: &SqlitePool, username: &str, role: Role) -> User {
    let hash = auth::hash_password("correct horse battery").expect("hash");
    user::create(pool, username, &hash, role)
        .await
        .expect("seed user")
}

pub async fn create_slot(
    pool: &SqlitePool,
    date_time: &str,
    capacity: i64,
    area: &str,
    price: f64,
    features: &str,
) -> TableSlot {
    slot::create(
        pool,
        TableSlotCreate {
            date_time: date_time.to_string(),
            capacity,
            area: Some(area.to_string()),
            price_per_person: Some(price),
            features: Some(features.to_string()),
        },
    )
    .await
    .expect("seed slot")
}

/// Slot starting `offset_minutes` from now, for cancellation-window tests
pub async fn slot_at_offset(pool: &SqlitePool, offset_minutes: i64, capacity: i64) -> TableSlot {
    let when = shared::util::now_millis() + offset_minutes * 60_000;
    create_slot(
        pool,
        &shared::util::millis_to_iso(when),
        capacity,
        "indoor",
        10.0,
        "",
    )
    .await
}

/// The core consistency property: for every slot, `is_booked` holds
/// exactly when one active reservation references it.
pub async fn assert_slot_invariant(pool: &SqlitePool) {
    let violations: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM table_slot s \
         WHERE (s.is_booked = 1) <> \
               ((SELECT COUNT(*) FROM reservation r \
                 WHERE r.table_slot_id = s.id AND r.status = 'active') = 1)",
    )
    .fetch_one(pool)
    .await
    .expect("invariant query");
    assert_eq!(violations, 0, "slot/reservation invariant violated");
}
