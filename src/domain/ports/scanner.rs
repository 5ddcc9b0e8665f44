use thiserror::Error;

use crate::domain::entities::process::ProcessSample;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to enumerate processes: {0}")]
    EnumerationFailed(String),
    #[error("process {0} is gone")]
    ProcessGone(u32),
}

pub trait ProcessScanner: Send + Sync {
    /// Snapshot all live processes whose command line contains `tag`
    /// (case-insensitive substring match).
    ///
    /// Best-effort, point-in-time: processes that vanish or become
    /// unreadable mid-scan are skipped, not reported as errors.
    ///
    /// # Errors
    ///
    /// Returns `ScanError` only if process enumeration itself fails.
    fn scan(&self, tag: &str) -> Result<Vec<ProcessSample>, ScanError>;

    /// Sample the resident memory of the invoking process only.
    ///
    /// # Errors
    ///
    /// Returns `ScanError` if the own-process entry cannot be read.
    fn self_sample(&self) -> Result<ProcessSample, ScanError>;
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn scan_error_display() {
        let err = ScanError::EnumerationFailed("proc table locked".to_string());
        assert_eq!(
            err.to_string(),
            "failed to enumerate processes: proc table locked"
        );

        let err = ScanError::ProcessGone(4242);
        assert_eq!(err.to_string(), "process 4242 is gone");
    }
}
