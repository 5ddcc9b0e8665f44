#![allow(clippy::expect_used)]

use chrono::Utc;

use memsentry::application::services::check::READING_KEY;
use memsentry::application::services::report::build_report;
use memsentry::domain::entities::reading::{Reading, ReadingScope};
use memsentry::domain::ports::relay::{RelayError, RelayStore};
use memsentry::infrastructure::relay::sqlite_relay::SqliteRelay;

fn reading(memory_mb: f64, threshold_mb: f64) -> Reading {
    Reading {
        memory_mb,
        threshold_mb,
        timestamp: Utc::now(),
        scope: ReadingScope::SingleProcess { pid: 4242 },
        processes: vec![],
    }
}

#[test]
fn reading_roundtrips_through_sqlite_relay() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("relay.db").to_string_lossy().to_string();
    let relay = SqliteRelay::new(&path).expect("open relay");

    let original = reading(420.0, 350.0);
    let payload = serde_json::to_string(&original).expect("serialize");
    relay
        .publish("single-process-20260806T101500Z", READING_KEY, &payload)
        .expect("publish");

    let fetched = relay
        .fetch("single-process-20260806T101500Z", READING_KEY)
        .expect("fetch");
    let roundtripped: Reading = serde_json::from_str(&fetched).expect("deserialize");
    assert_eq!(roundtripped, original);
}

#[test]
fn reading_survives_a_process_boundary() {
    // The check and report steps may run as separate invocations; a fresh
    // relay instance on the same file stands in for the second process.
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("relay.db").to_string_lossy().to_string();

    {
        let check_side = SqliteRelay::new(&path).expect("open relay");
        let payload = serde_json::to_string(&reading(1450.0, 1300.0)).expect("serialize");
        check_side
            .publish("run-1", READING_KEY, &payload)
            .expect("publish");
    }

    let report_side = SqliteRelay::new(&path).expect("reopen relay");
    let summary = build_report(&report_side, "run-1", "smtp.example.com:587", "ops@example.com")
        .expect("report");
    assert_eq!(summary.status, "ALERT");
    assert_eq!(format!("{:.1}", summary.usage_percent), "111.5");
}

#[test]
fn fetch_for_unknown_run_id_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("relay.db").to_string_lossy().to_string();
    let relay = SqliteRelay::new(&path).expect("open relay");

    let err = relay
        .fetch("run-that-never-was", READING_KEY)
        .expect_err("must miss");
    assert!(matches!(err, RelayError::NotFound(_)));
}

#[test]
fn republish_within_a_run_overwrites() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("relay.db").to_string_lossy().to_string();
    let relay = SqliteRelay::new(&path).expect("open relay");

    relay.publish("run-1", READING_KEY, "first").expect("publish");
    relay
        .publish("run-1", READING_KEY, "second")
        .expect("republish");

    assert_eq!(relay.fetch("run-1", READING_KEY).expect("fetch"), "second");
}

#[test]
fn distinct_runs_never_collide() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("relay.db").to_string_lossy().to_string();
    let relay = SqliteRelay::new(&path).expect("open relay");

    let a = serde_json::to_string(&reading(100.0, 350.0)).expect("serialize");
    let b = serde_json::to_string(&reading(200.0, 350.0)).expect("serialize");
    relay.publish("run-a", READING_KEY, &a).expect("publish a");
    relay.publish("run-b", READING_KEY, &b).expect("publish b");

    assert_eq!(relay.fetch("run-a", READING_KEY).expect("fetch a"), a);
    assert_eq!(relay.fetch("run-b", READING_KEY).expect("fetch b"), b);
}
