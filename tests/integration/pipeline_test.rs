#![allow(clippy::expect_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use memsentry::application::services::check::{CheckService, CheckSettings};
use memsentry::application::services::report::{build_report, ReportError};
use memsentry::domain::entities::alert::Alert;
use memsentry::domain::entities::process::ProcessSample;
use memsentry::domain::entities::reading::ReadingScope;
use memsentry::domain::ports::notifier::{NotificationError, Notifier};
use memsentry::domain::ports::scanner::{ProcessScanner, ScanError};
use memsentry::domain::value_objects::outcome::NotifyOutcome;
use memsentry::infrastructure::relay::in_memory_relay::InMemoryRelay;
use memsentry::presentation::cli::formatters::report_fmt;

// ---------------------------------------------------------------------------
// MockScanner
// ---------------------------------------------------------------------------

struct MockScanner {
    samples: Vec<ProcessSample>,
    scan_calls: AtomicUsize,
}

impl MockScanner {
    fn with_memories(memories: &[f64]) -> Self {
        let samples = memories
            .iter()
            .enumerate()
            .map(|(i, &rss_mb)| ProcessSample {
                pid: u32::try_from(i).expect("small index") + 100,
                cmdline: format!("worker --shard {i}"),
                rss_mb,
            })
            .collect();
        Self {
            samples,
            scan_calls: AtomicUsize::new(0),
        }
    }
}

impl ProcessScanner for MockScanner {
    fn scan(&self, _tag: &str) -> Result<Vec<ProcessSample>, ScanError> {
        self.scan_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.samples.clone())
    }

    fn self_sample(&self) -> Result<ProcessSample, ScanError> {
        Ok(ProcessSample {
            pid: 4242,
            cmdline: "memsentry check self".to_string(),
            rss_mb: 420.0,
        })
    }
}

// ---------------------------------------------------------------------------
// TrackingNotifier
// ---------------------------------------------------------------------------

struct TrackingNotifier {
    sent: Mutex<Vec<Alert>>,
    fail: bool,
}

impl TrackingNotifier {
    const fn new() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            fail: false,
        }
    }

    const fn failing() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            fail: true,
        }
    }

    fn sent_alerts(&self) -> Vec<Alert> {
        self.sent.lock().expect("lock").clone()
    }
}

#[async_trait]
impl Notifier for TrackingNotifier {
    async fn send(&self, alert: &Alert) -> Result<(), NotificationError> {
        if self.fail {
            return Err(NotificationError::SendFailed(
                "connection refused".to_string(),
            ));
        }
        self.sent.lock().expect("lock").push(alert.clone());
        Ok(())
    }
}

fn settings(threshold_mb: f64) -> CheckSettings {
    CheckSettings {
        threshold_mb,
        recipient: "ops@example.com".to_string(),
    }
}

// ---------------------------------------------------------------------------
// End-to-end scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn over_threshold_run_alerts_and_reports_alert() {
    let scanner = MockScanner::with_memories(&[1000.0, 300.0, 150.0]);
    let relay = InMemoryRelay::new();
    let notifier = TrackingNotifier::new();
    let service = CheckService::new(&scanner, &relay, &notifier);

    let outcome = service
        .check_all("run-alert", "worker", &settings(1300.0))
        .await
        .expect("check");

    assert_eq!(outcome.notify, NotifyOutcome::AlertSent);
    assert_eq!(notifier.sent_alerts().len(), 1);

    let summary = build_report(&relay, "run-alert", "smtp.example.com:587", "ops@example.com")
        .expect("report");
    let text = report_fmt::render(&summary);

    assert!(text.contains("ALERT"));
    assert!(text.contains("111.5 %"));
    assert!(text.contains("1450.00 MB"));
}

#[tokio::test]
async fn under_threshold_run_is_quiet_and_reports_ok() {
    let scanner = MockScanner::with_memories(&[500.0, 400.0]);
    let relay = InMemoryRelay::new();
    let notifier = TrackingNotifier::new();
    let service = CheckService::new(&scanner, &relay, &notifier);

    let outcome = service
        .check_all("run-ok", "worker", &settings(1300.0))
        .await
        .expect("check");

    assert_eq!(outcome.notify, NotifyOutcome::OkNoAlert);
    assert!(notifier.sent_alerts().is_empty(), "no notification attempt");

    let summary = build_report(&relay, "run-ok", "smtp.example.com:587", "ops@example.com")
        .expect("report");
    let text = report_fmt::render(&summary);

    assert!(text.contains("OK"));
    assert!(text.contains("69.2 %"));
}

#[tokio::test]
async fn aggregate_reading_sums_and_counts_synthetic_processes() {
    let scanner = MockScanner::with_memories(&[100.0, 250.0, 50.0]);
    let relay = InMemoryRelay::new();
    let notifier = TrackingNotifier::new();
    let service = CheckService::new(&scanner, &relay, &notifier);

    let outcome = service
        .check_all("run-sum", "worker", &settings(1300.0))
        .await
        .expect("check");

    assert!((outcome.reading.memory_mb - 400.0).abs() < f64::EPSILON);
    assert_eq!(
        outcome.reading.scope,
        ReadingScope::Aggregate { process_count: 3 }
    );
}

#[tokio::test]
async fn single_process_check_never_scans_other_processes() {
    let scanner = MockScanner::with_memories(&[100.0]);
    let relay = InMemoryRelay::new();
    let notifier = TrackingNotifier::new();
    let service = CheckService::new(&scanner, &relay, &notifier);

    let outcome = service
        .check_self("run-self", &settings(350.0))
        .await
        .expect("check");

    assert_eq!(scanner.scan_calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        outcome.reading.scope,
        ReadingScope::SingleProcess { pid: 4242 }
    );
}

#[tokio::test]
async fn delivery_failure_still_completes_the_run_with_a_report() {
    let scanner = MockScanner::with_memories(&[1450.0]);
    let relay = InMemoryRelay::new();
    let notifier = TrackingNotifier::failing();
    let service = CheckService::new(&scanner, &relay, &notifier);

    let outcome = service
        .check_all("run-fail", "worker", &settings(1300.0))
        .await
        .expect("mail failure must not fail the check step");

    assert_eq!(outcome.notify, NotifyOutcome::SendFailed);

    // The reading was still published; the report step is unaffected by
    // the delivery outcome and recomputes ALERT on its own.
    let summary = build_report(&relay, "run-fail", "smtp.example.com:587", "ops@example.com")
        .expect("report");
    assert_eq!(summary.status, "ALERT");
}

#[tokio::test]
async fn report_without_preceding_check_is_an_explicit_failure() {
    let relay = InMemoryRelay::new();

    let err = build_report(&relay, "run-missing", "smtp:587", "ops@example.com")
        .expect_err("must fail");
    assert!(matches!(err, ReportError::MissingReading(_)));
}
