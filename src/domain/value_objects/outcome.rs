use serde::{Deserialize, Serialize};

/// Result of the conditional notification step of a run.
///
/// `SendFailed` is a recovered state: delivery problems are logged and the
/// run carries on to its report step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyOutcome {
    AlertSent,
    OkNoAlert,
    SendFailed,
}

impl std::fmt::Display for NotifyOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlertSent => write!(f, "ALERT_SENT"),
            Self::OkNoAlert => write!(f, "OK_NO_ALERT"),
            Self::SendFailed => write!(f, "SEND_FAILED"),
        }
    }
}
