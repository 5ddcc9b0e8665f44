use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::entities::alert::Alert;
use crate::domain::entities::reading::{Reading, ReadingScope};
use crate::domain::ports::notifier::Notifier;
use crate::domain::ports::relay::RelayStore;
use crate::domain::ports::scanner::ProcessScanner;
use crate::domain::value_objects::outcome::NotifyOutcome;

/// Relay key under which the check step publishes its reading.
pub const READING_KEY: &str = "reading";

/// Per-variant parameters resolved from configuration at run start.
///
/// Resolved fresh for every run so threshold changes take effect on the
/// next scheduled invocation without a restart.
#[derive(Debug, Clone)]
pub struct CheckSettings {
    pub threshold_mb: f64,
    pub recipient: String,
}

/// What one check step produced: the fresh reading and the notification
/// outcome. The reading has already been published to the relay when this
/// is returned.
#[derive(Debug)]
pub struct CheckOutcome {
    pub reading: Reading,
    pub notify: NotifyOutcome,
}

/// Orchestrates one check step: measure, publish, conditionally notify.
pub struct CheckService<'a> {
    scanner: &'a dyn ProcessScanner,
    relay: &'a dyn RelayStore,
    notifier: &'a dyn Notifier,
}

impl<'a> CheckService<'a> {
    #[must_use]
    pub const fn new(
        scanner: &'a dyn ProcessScanner,
        relay: &'a dyn RelayStore,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            scanner,
            relay,
            notifier,
        }
    }

    /// Aggregate variant: sum resident memory over every process whose
    /// command line contains `tag`. Zero matches is a valid reading of
    /// 0 MB, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if process enumeration fails or the reading
    /// cannot be published to the relay.
    pub async fn check_all(
        &self,
        run_id: &str,
        tag: &str,
        settings: &CheckSettings,
    ) -> Result<CheckOutcome> {
        debug!(run_id, tag, "scanning process group");
        let samples = self
            .scanner
            .scan(tag)
            .with_context(|| format!("scan for tag '{tag}' failed"))?;

        let memory_mb: f64 = samples.iter().map(|s| s.rss_mb).sum();
        let reading = Reading {
            memory_mb,
            threshold_mb: settings.threshold_mb,
            timestamp: Utc::now(),
            scope: ReadingScope::Aggregate {
                process_count: samples.len(),
            },
            processes: samples,
        };
        debug!(run_id, memory_mb, "group memory measured");

        self.publish_and_notify(run_id, reading, settings).await
    }

    /// Single-process variant: resident memory of the invoking process
    /// only. Never enumerates other processes.
    ///
    /// # Errors
    ///
    /// Returns an error if the own-process sample cannot be read or the
    /// reading cannot be published to the relay.
    pub async fn check_self(&self, run_id: &str, settings: &CheckSettings) -> Result<CheckOutcome> {
        let sample = self
            .scanner
            .self_sample()
            .context("own-process sample failed")?;

        let reading = Reading {
            memory_mb: sample.rss_mb,
            threshold_mb: settings.threshold_mb,
            timestamp: Utc::now(),
            scope: ReadingScope::SingleProcess { pid: sample.pid },
            processes: vec![],
        };
        debug!(run_id, memory_mb = reading.memory_mb, "own memory measured");

        self.publish_and_notify(run_id, reading, settings).await
    }

    async fn publish_and_notify(
        &self,
        run_id: &str,
        reading: Reading,
        settings: &CheckSettings,
    ) -> Result<CheckOutcome> {
        // The relay write must succeed: a reading that ran but disappeared
        // would make the report step lie about the run.
        let payload = serde_json::to_string(&reading).context("serialize reading")?;
        self.relay
            .publish(run_id, READING_KEY, &payload)
            .with_context(|| format!("publish reading for run '{run_id}'"))?;
        debug!(run_id, "reading published");

        let notify = self
            .notify_if_over_threshold(&reading, &settings.recipient)
            .await;
        Ok(CheckOutcome { reading, notify })
    }

    /// Strict `>` comparison; a reading exactly at threshold performs no
    /// network I/O. Delivery failures are logged and absorbed; the run
    /// must carry on to its report step regardless of mail outcome.
    pub async fn notify_if_over_threshold(
        &self,
        reading: &Reading,
        recipient: &str,
    ) -> NotifyOutcome {
        if !reading.is_over_threshold() {
            return NotifyOutcome::OkNoAlert;
        }

        let alert = Alert::from_reading(reading, recipient);
        match self.notifier.send(&alert).await {
            Ok(()) => {
                info!(
                    memory_mb = reading.memory_mb,
                    threshold_mb = reading.threshold_mb,
                    recipient,
                    "alert sent"
                );
                NotifyOutcome::AlertSent
            }
            Err(e) => {
                warn!(error = %e, recipient, "alert delivery failed");
                NotifyOutcome::SendFailed
            }
        }
    }
}
