use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::process::ProcessSample;

/// Result of one measurement pass.
///
/// Built fresh from live resident-set sizes on every scheduled run,
/// published once to the relay and consumed by the report step of the
/// same run. Never derived from a previous reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub memory_mb: f64,
    pub threshold_mb: f64,
    pub timestamp: DateTime<Utc>,
    pub scope: ReadingScope,
    /// Per-process breakdown; populated for aggregate readings only.
    #[serde(default)]
    pub processes: Vec<ProcessSample>,
}

/// Which measurement policy produced the reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingScope {
    Aggregate { process_count: usize },
    SingleProcess { pid: u32 },
}

impl Reading {
    /// `memory / threshold * 100`, or `0.0` when the threshold is zero.
    #[must_use]
    pub fn usage_percent(&self) -> f64 {
        if self.threshold_mb > 0.0 {
            self.memory_mb / self.threshold_mb * 100.0
        } else {
            0.0
        }
    }

    /// Strict comparison: a reading exactly at threshold is not over.
    #[must_use]
    pub fn is_over_threshold(&self) -> bool {
        self.memory_mb > self.threshold_mb
    }

    #[must_use]
    pub fn status_label(&self) -> &'static str {
        if self.is_over_threshold() {
            "ALERT"
        } else {
            "OK"
        }
    }
}
