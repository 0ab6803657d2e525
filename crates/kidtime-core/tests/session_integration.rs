//! Integration tests for a full tracking session.

use std::time::Duration;

use chrono::NaiveDate;
use kidtime_core::{
    Database, Event, FirePolicy, HistoryLedger, HistoryStore, MemoryStore, Session,
    SessionOptions, Ticker, HISTORY_KEY,
};
use tempfile::TempDir;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

fn tick_n<S: HistoryStore>(session: &mut Session<S>, n: usize) -> Vec<Event> {
    (0..n).flat_map(|_| session.tick()).collect()
}

fn fired_texts(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::ReminderFired { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_two_stops_same_day_update_one_entry() {
    let mut session = Session::open(MemoryStore::new(), SessionOptions::default());

    session.toggle_main_on(day(10));
    tick_n(&mut session, 10);
    session.toggle_main_on(day(10));

    let entry = session.ledger().get(day(10)).unwrap().clone();
    assert_eq!(entry.total_time, 10);
    assert_eq!(entry.homework_time, 0);

    session.toggle_main_on(day(10));
    session.toggle_homework();
    tick_n(&mut session, 5);
    session.toggle_main_on(day(10));

    assert_eq!(session.ledger().len(), 1);
    let updated = session.ledger().get(day(10)).unwrap();
    assert_eq!(updated.id, entry.id);
    assert_eq!(updated.total_time, 15);
    assert_eq!(updated.homework_time, 5);

    let stored = session.store().get(HISTORY_KEY).unwrap();
    let restored = HistoryLedger::deserialize(Some(stored));
    assert_eq!(restored.entries(), session.ledger().entries());
}

#[test]
fn test_reminder_added_mid_session_fires_at_offset() {
    let mut session = Session::open(MemoryStore::new(), SessionOptions::default());
    session.toggle_main_on(day(10));
    tick_n(&mut session, 120);

    session.add_reminder("stretch", 5);
    assert_eq!(session.scheduler().pending()[0].target_time, 420);

    let before = tick_n(&mut session, 299);
    assert!(fired_texts(&before).is_empty());

    let at_target = session.tick();
    assert_eq!(fired_texts(&at_target), vec!["stretch"]);
    assert_eq!(session.accumulator().total(), 420);
    assert!(session.scheduler().is_empty());

    let after = tick_n(&mut session, 120);
    assert!(fired_texts(&after).is_empty());
}

#[test]
fn test_pause_does_not_skip_exact_target() {
    // Pausing freezes the total, so resuming still lands on the target.
    let mut session = Session::open(MemoryStore::new(), SessionOptions::default());
    session.add_reminder("snack", 1);
    session.toggle_main_on(day(10));
    tick_n(&mut session, 30);
    session.toggle_main_on(day(10));
    tick_n(&mut session, 100);
    session.toggle_main_on(day(10));

    let events = tick_n(&mut session, 30);
    assert_eq!(fired_texts(&events), vec!["snack"]);
}

#[test]
fn test_zero_minute_reminder_depends_on_policy() {
    let mut exact = Session::open(MemoryStore::new(), SessionOptions::default());
    exact.toggle_main_on(day(10));
    exact.add_reminder("right now", 0);
    assert!(fired_texts(&tick_n(&mut exact, 5)).is_empty());
    assert_eq!(exact.scheduler().len(), 1);

    let mut reached = Session::open(
        MemoryStore::new(),
        SessionOptions {
            fire_policy: FirePolicy::Reached,
            ..SessionOptions::default()
        },
    );
    reached.toggle_main_on(day(10));
    reached.add_reminder("right now", 0);
    assert_eq!(fired_texts(&reached.tick()), vec!["right now"]);
    assert!(reached.scheduler().is_empty());
}

#[test]
fn test_history_survives_reopen_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kidtime.db");

    {
        let db = Database::open_at(&path).unwrap();
        let mut session = Session::open(db, SessionOptions::default());
        session.toggle_main_on(day(9));
        tick_n(&mut session, 42);
        session.toggle_main_on(day(9));
    }

    let db = Database::open_at(&path).unwrap();
    let mut session = Session::open(db, SessionOptions::default());
    assert_eq!(session.ledger().get(day(9)).unwrap().total_time, 42);

    // Counters start fresh; a new day gets its own entry.
    session.toggle_main_on(day(10));
    tick_n(&mut session, 3);
    session.toggle_main_on(day(10));
    assert_eq!(session.ledger().len(), 2);
    assert_eq!(session.ledger().get(day(10)).unwrap().total_time, 3);
}

#[test]
fn test_corrupt_stored_history_starts_empty() {
    let store = MemoryStore::with_value(HISTORY_KEY, "not json at all");
    let mut session = Session::open(store, SessionOptions::default());
    assert!(session.ledger().is_empty());

    session.toggle_main_on(day(10));
    session.tick();
    session.toggle_main_on(day(10));
    assert_eq!(session.ledger().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_ticker_drives_session() {
    let mut session = Session::open(MemoryStore::new(), SessionOptions::default());
    let (mut ticker, mut pulses) = Ticker::new(Duration::from_secs(1));

    session.add_reminder("drink water", 1);
    session.toggle_main_on(day(10));
    ticker.arm();

    let mut fired = Vec::new();
    while session.accumulator().total() < 60 {
        let pulse = pulses.recv().await.unwrap();
        if !ticker.is_current(&pulse) {
            continue;
        }
        fired.extend(fired_texts(&session.tick()));
    }
    ticker.disarm();
    session.toggle_main_on(day(10));

    assert_eq!(fired, vec!["drink water"]);
    assert_eq!(session.ledger().get(day(10)).unwrap().total_time, 60);
}
