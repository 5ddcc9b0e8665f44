use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::alert::Alert;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("failed to send notification: {0}")]
    SendFailed(String),
    #[error("notification channel unavailable: {0}")]
    ChannelUnavailable(String),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver the alert to its recipient.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError` if the message cannot be built,
    /// the transport cannot be reached, or delivery is rejected.
    async fn send(&self, alert: &Alert) -> Result<(), NotificationError>;
}
