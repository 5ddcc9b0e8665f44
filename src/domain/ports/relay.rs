use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("no value published for {0}")]
    NotFound(String),
    #[error("relay read failed: {0}")]
    ReadFailed(String),
    #[error("relay write failed: {0}")]
    WriteFailed(String),
}

/// Run-scoped key/value handoff between the check and report steps.
///
/// Keys are scoped by `run_id` so overlapping runs can never read each
/// other's values. Entries must survive a process boundary (the two steps
/// may execute as separate invocations) but carry no meaning beyond the
/// run's lifetime.
pub trait RelayStore: Send + Sync {
    /// Publish `value` under `(run_id, key)`.
    ///
    /// Re-publishing the same key within a run overwrites the previous
    /// value (last-write-wins; there is a single producer per run).
    ///
    /// # Errors
    ///
    /// Returns `RelayError::WriteFailed` if the write fails.
    fn publish(&self, run_id: &str, key: &str, value: &str) -> Result<(), RelayError>;

    /// Fetch the value published under `(run_id, key)`.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::NotFound` when nothing was published for the
    /// pair, `RelayError::ReadFailed` on storage errors.
    fn fetch(&self, run_id: &str, key: &str) -> Result<String, RelayError>;
}
