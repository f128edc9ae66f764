//! Reservation ledger behavior against a real SQLite store:
//! the book/cancel state machine, validation ordering, the cancellation
//! window and the slot/reservation consistency invariant.

mod common;

use common::{assert_slot_invariant, create_slot, seed_user, setup, slot_at_offset};
use reserve_server::db::repository::reservation::{self, LedgerError};
use reserve_server::db::repository::review;
use reserve_server::db::repository::slot::{self, SlotFilter};
use reserve_server::db::repository::{report, RepoError};
use reserve_server::utils::time;
use shared::models::{ReservationStatus, Role};

#[tokio::test]
async fn test_book_cancel_rebook_scenario() {
    let ctx = setup().await;
    let pool = &ctx.state.pool;

    let alice = seed_user(pool, "alice", Role::Customer).await;
    let bob = seed_user(pool, "bob", Role::Customer).await;
    // Slot three hours out, capacity four
    let s1 = slot_at_offset(pool, 180, 4).await;
    assert!(!s1.is_booked);

    // Book(alice, S1, party=4) succeeds
    let r1 = reservation::book(pool, alice.id, s1.id, 4).await.expect("book");
    assert_eq!(r1.status, ReservationStatus::Active);
    assert_eq!(r1.table_slot_id, s1.id);
    let s1_after = slot::find_by_id(pool, s1.id).await.unwrap().unwrap();
    assert!(s1_after.is_booked);
    assert_slot_invariant(pool).await;

    // Book(bob, S1, party=2) conflicts
    let err = reservation::book(pool, bob.id, s1.id, 2).await.unwrap_err();
    assert!(matches!(err, LedgerError::SlotAlreadyBooked(id) if id == s1.id));
    assert_slot_invariant(pool).await;

    // Cancel(alice, R1) three hours ahead reopens the slot
    reservation::cancel(pool, alice.id, r1.id, 120).await.expect("cancel");
    let s1_after = slot::find_by_id(pool, s1.id).await.unwrap().unwrap();
    assert!(!s1_after.is_booked);
    let r1_after = reservation::find_by_id(pool, r1.id).await.unwrap().unwrap();
    assert_eq!(r1_after.status, ReservationStatus::Cancelled);
    assert_slot_invariant(pool).await;

    // Book(bob, S1, party=2) now succeeds with a fresh reservation
    let r2 = reservation::book(pool, bob.id, s1.id, 2).await.expect("rebook");
    assert_ne!(r2.id, r1.id);
    assert_eq!(r2.status, ReservationStatus::Active);
    let r1_still = reservation::find_by_id(pool, r1.id).await.unwrap().unwrap();
    assert_eq!(r1_still.status, ReservationStatus::Cancelled);
    assert_slot_invariant(pool).await;
}

#[tokio::test]
async fn test_party_size_validation() {
    let ctx = setup().await;
    let pool = &ctx.state.pool;

    let alice = seed_user(pool, "alice", Role::Customer).await;
    let bob = seed_user(pool, "bob", Role::Customer).await;
    let slot = slot_at_offset(pool, 180, 4).await;

    // Party below one is rejected before touching the store
    let err = reservation::book(pool, alice.id, slot.id, 0).await.unwrap_err();
    assert!(matches!(err, LedgerError::PartyTooSmall));

    // Oversized party on an open slot
    let err = reservation::book(pool, alice.id, slot.id, 5).await.unwrap_err();
    assert!(matches!(err, LedgerError::PartyTooLarge { party: 5, capacity: 4 }));
    // The failed attempt must not have flipped the flag
    assert!(!slot::find_by_id(pool, slot.id).await.unwrap().unwrap().is_booked);

    // Oversized party still reports the size problem when the slot is booked
    reservation::book(pool, alice.id, slot.id, 2).await.expect("book");
    let err = reservation::book(pool, bob.id, slot.id, 9).await.unwrap_err();
    assert!(matches!(err, LedgerError::PartyTooLarge { .. }));

    assert_slot_invariant(pool).await;
}

#[tokio::test]
async fn test_book_missing_slot() {
    let ctx = setup().await;
    let pool = &ctx.state.pool;
    let alice = seed_user(pool, "alice", Role::Customer).await;

    let err = reservation::book(pool, alice.id, 424242, 2).await.unwrap_err();
    assert!(matches!(err, LedgerError::SlotNotFound(424242)));
}

#[tokio::test]
async fn test_cancel_window_and_ownership() {
    let ctx = setup().await;
    let pool = &ctx.state.pool;

    let alice = seed_user(pool, "alice", Role::Customer).await;
    let mallory = seed_user(pool, "mallory", Role::Customer).await;

    // Slot only one hour out: booking works, cancelling is too late
    let near = slot_at_offset(pool, 60, 2).await;
    let r_near = reservation::book(pool, alice.id, near.id, 2).await.unwrap();
    let err = reservation::cancel(pool, alice.id, r_near.id, 120).await.unwrap_err();
    assert!(matches!(err, LedgerError::WindowClosed(120)));
    // Refused cancellation must leave everything in place
    let r_check = reservation::find_by_id(pool, r_near.id).await.unwrap().unwrap();
    assert_eq!(r_check.status, ReservationStatus::Active);
    assert!(slot::find_by_id(pool, near.id).await.unwrap().unwrap().is_booked);
    assert_slot_invariant(pool).await;

    // Slot three hours out: non-owners see not-found, owners succeed
    let far = slot_at_offset(pool, 180, 2).await;
    let r_far = reservation::book(pool, alice.id, far.id, 2).await.unwrap();
    let err = reservation::cancel(pool, mallory.id, r_far.id, 120).await.unwrap_err();
    assert!(matches!(err, LedgerError::ReservationNotFound(_)));

    reservation::cancel(pool, alice.id, r_far.id, 120).await.expect("cancel");

    // A second cancellation hits the not-active guard
    let err = reservation::cancel(pool, alice.id, r_far.id, 120).await.unwrap_err();
    assert!(matches!(err, LedgerError::NotActive(_)));

    // Unknown reservation id
    let err = reservation::cancel(pool, alice.id, 99999, 120).await.unwrap_err();
    assert!(matches!(err, LedgerError::ReservationNotFound(99999)));

    assert_slot_invariant(pool).await;
}

#[tokio::test]
async fn test_list_by_user_history() {
    let ctx = setup().await;
    let pool = &ctx.state.pool;

    let alice = seed_user(pool, "alice", Role::Customer).await;
    let s1 = slot_at_offset(pool, 180, 4).await;
    let s2 = slot_at_offset(pool, 240, 2).await;

    let r1 = reservation::book(pool, alice.id, s1.id, 2).await.unwrap();
    reservation::cancel(pool, alice.id, r1.id, 120).await.unwrap();
    // Keep created_at strictly ordered across the two bookings
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let r2 = reservation::book(pool, alice.id, s2.id, 2).await.unwrap();

    // History includes the cancelled entry, newest first
    let all = reservation::list_by_user(pool, alice.id, true).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, r2.id);
    assert_eq!(all[0].status, ReservationStatus::Active);
    assert_eq!(all[1].id, r1.id);
    assert_eq!(all[1].status, ReservationStatus::Cancelled);
    // Joined slot data is present
    assert_eq!(all[0].capacity, 2);

    // The filter point drops cancelled entries
    let active_only = reservation::list_by_user(pool, alice.id, false).await.unwrap();
    assert_eq!(active_only.len(), 1);
    assert_eq!(active_only[0].id, r2.id);
}

#[tokio::test]
async fn test_search_filters() {
    let ctx = setup().await;
    let pool = &ctx.state.pool;
    let alice = seed_user(pool, "alice", Role::Customer).await;

    let patio_cheap = create_slot(pool, "2031-07-01T19:00:00Z", 4, "patio", 15.0, "window, sofa").await;
    let patio_pricey = create_slot(pool, "2031-07-01T18:00:00Z", 4, "patio", 35.0, "quiet").await;
    let indoor = create_slot(pool, "2031-07-02T19:00:00Z", 6, "indoor", 12.0, "sofa").await;
    let patio_late = create_slot(pool, "2031-07-03T20:30:00Z", 2, "patio", 18.0, "").await;

    // area + price_max, ascending by date_time
    let found = slot::search(
        pool,
        &SlotFilter {
            only_available: true,
            area: Some("patio".into()),
            price_max: Some(20.0),
            ..SlotFilter::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(
        found.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![patio_cheap.id, patio_late.id]
    );
    assert!(found.iter().all(|s| s.area == "patio" && s.price_per_person <= 20.0));

    // only_available excludes booked slots; disabling it shows them
    reservation::book(pool, alice.id, patio_cheap.id, 2).await.unwrap();
    let open_only = slot::search(
        pool,
        &SlotFilter {
            only_available: true,
            area: Some("patio".into()),
            ..SlotFilter::default()
        },
    )
    .await
    .unwrap();
    assert!(open_only.iter().all(|s| s.id != patio_cheap.id));
    let everything = slot::search(
        pool,
        &SlotFilter {
            only_available: false,
            area: Some("patio".into()),
            ..SlotFilter::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(everything.len(), 3);

    // Day filter
    let day = chrono::NaiveDate::from_ymd_opt(2031, 7, 2).unwrap();
    let on_day = slot::search(
        pool,
        &SlotFilter {
            only_available: false,
            day_range: Some(reserve_server::utils::time::day_range_millis(day)),
            ..SlotFilter::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(on_day.iter().map(|s| s.id).collect::<Vec<_>>(), vec![indoor.id]);

    // Time-of-day filter matches hour and minute exactly
    let at_2030 = slot::search(
        pool,
        &SlotFilter {
            only_available: false,
            time_of_day: Some((20, 30)),
            ..SlotFilter::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(at_2030.iter().map(|s| s.id).collect::<Vec<_>>(), vec![patio_late.id]);

    // Feature terms match ANY term, case-insensitive substring
    let cosy = slot::search(
        pool,
        &SlotFilter {
            only_available: false,
            feature_terms: vec!["sofa".into(), "quiet".into()],
            ..SlotFilter::default()
        },
    )
    .await
    .unwrap();
    let ids: Vec<i64> = cosy.iter().map(|s| s.id).collect();
    assert!(ids.contains(&patio_cheap.id));
    assert!(ids.contains(&patio_pricey.id));
    assert!(ids.contains(&indoor.id));
    assert!(!ids.contains(&patio_late.id));

    // Minimum size
    let big = slot::search(
        pool,
        &SlotFilter {
            only_available: false,
            min_size: Some(5),
            ..SlotFilter::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(big.iter().map(|s| s.id).collect::<Vec<_>>(), vec![indoor.id]);
}

#[tokio::test]
async fn test_slot_create_validation() {
    let ctx = setup().await;
    let pool = &ctx.state.pool;

    let err = slot::create(
        pool,
        shared::models::TableSlotCreate {
            date_time: "next friday".into(),
            capacity: 4,
            area: None,
            price_per_person: None,
            features: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let err = slot::create(
        pool,
        shared::models::TableSlotCreate {
            date_time: "2031-07-01T19:00:00Z".into(),
            capacity: 0,
            area: None,
            price_per_person: None,
            features: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let err = slot::create(
        pool,
        shared::models::TableSlotCreate {
            date_time: "2031-07-01T19:00:00Z".into(),
            capacity: 4,
            area: None,
            price_per_person: Some(-1.0),
            features: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    // Defaults: open slot, indoor area, zero price
    let created = slot::create(
        pool,
        shared::models::TableSlotCreate {
            date_time: "2031-07-01T19:00:00Z".into(),
            capacity: 4,
            area: None,
            price_per_person: None,
            features: None,
        },
    )
    .await
    .unwrap();
    assert!(!created.is_booked);
    assert_eq!(created.area, "indoor");
    assert_eq!(created.price_per_person, 0.0);
}

#[tokio::test]
async fn test_reports_count_by_slot_day() {
    let ctx = setup().await;
    let pool = &ctx.state.pool;

    let alice = seed_user(pool, "alice", Role::Customer).await;
    let bob = seed_user(pool, "bob", Role::Customer).await;

    // Two slots far enough out to allow cancellation
    let day_a = slot_at_offset(pool, 200, 4).await;
    let day_a2 = slot_at_offset(pool, 210, 4).await;

    let r1 = reservation::book(pool, alice.id, day_a.id, 2).await.unwrap();
    reservation::book(pool, bob.id, day_a2.id, 2).await.unwrap();
    reservation::cancel(pool, alice.id, r1.id, 120).await.unwrap();

    let (start, end) = time::day_range_millis(time::today_utc());
    // Slots ~3.5h out may land on tomorrow near midnight; widen to cover both
    let end = end + 86_400_000;

    // Historic behavior counts cancelled rows too
    let with_cancelled = report::count_in_range(pool, start, end, true).await.unwrap();
    assert_eq!(with_cancelled, 2);

    let active_only = report::count_in_range(pool, start, end, false).await.unwrap();
    assert_eq!(active_only, 1);

    // Empty window
    let none = report::count_in_range(pool, 0, 1, true).await.unwrap();
    assert_eq!(none, 0);
}

#[tokio::test]
async fn test_review_log() {
    let ctx = setup().await;
    let pool = &ctx.state.pool;

    let alice = seed_user(pool, "alice", Role::Customer).await;

    let err = review::add(pool, alice.id, 0, "meh").await.unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    let err = review::add(pool, alice.id, 6, "great").await.unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    review::add(pool, alice.id, 4, "solid dinner").await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    review::add(pool, alice.id, 5, "").await.unwrap();

    let feed = review::list_recent(pool, 50).await.unwrap();
    assert_eq!(feed.len(), 2);
    // Newest first, joined with the author's username
    assert_eq!(feed[0].rating, 5);
    assert_eq!(feed[0].username, "alice");
    assert_eq!(feed[1].comment, "solid dinner");

    // Limit applies
    let one = review::list_recent(pool, 1).await.unwrap();
    assert_eq!(one.len(), 1);
}
