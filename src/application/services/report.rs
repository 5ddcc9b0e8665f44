use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::domain::entities::reading::{Reading, ReadingScope};
use crate::domain::ports::relay::{RelayError, RelayStore};

use super::check::READING_KEY;

#[derive(Error, Debug)]
pub enum ReportError {
    /// The check step never published a reading for this run. Surfaced
    /// to the scheduler as a failed step so a broken check→report chain
    /// is visible, never mistaken for "no alert".
    #[error("no reading published for run '{0}'")]
    MissingReading(String),
    #[error("stored reading is corrupt: {0}")]
    CorruptReading(String),
    #[error(transparent)]
    Relay(RelayError),
}

/// Read-only summary of one run, recomputed from the published reading.
///
/// Status and percentage are derived here, independently of whatever the
/// check step concluded: reporting is decoupled from whether an alert
/// mail actually went out.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub run_id: String,
    pub status: String,
    pub memory_mb: f64,
    pub threshold_mb: f64,
    pub usage_percent: f64,
    pub scope: ReadingScope,
    pub timestamp: DateTime<Utc>,
    pub smtp_endpoint: String,
    pub recipient: String,
}

/// Fetch the reading published for `run_id` and summarize it.
///
/// # Errors
///
/// Returns `ReportError::MissingReading` when no reading was published
/// for the run, `ReportError::CorruptReading` if the stored payload does
/// not deserialize, or `ReportError::Relay` on storage failures.
pub fn build_report(
    relay: &dyn RelayStore,
    run_id: &str,
    smtp_endpoint: &str,
    recipient: &str,
) -> Result<ReportSummary, ReportError> {
    let payload = match relay.fetch(run_id, READING_KEY) {
        Ok(payload) => payload,
        Err(RelayError::NotFound(_)) => {
            return Err(ReportError::MissingReading(run_id.to_string()))
        }
        Err(e) => return Err(ReportError::Relay(e)),
    };

    let reading: Reading =
        serde_json::from_str(&payload).map_err(|e| ReportError::CorruptReading(e.to_string()))?;

    Ok(ReportSummary {
        run_id: run_id.to_string(),
        status: reading.status_label().to_string(),
        memory_mb: reading.memory_mb,
        threshold_mb: reading.threshold_mb,
        usage_percent: reading.usage_percent(),
        scope: reading.scope,
        timestamp: reading.timestamp,
        smtp_endpoint: smtp_endpoint.to_string(),
        recipient: recipient.to_string(),
    })
}
