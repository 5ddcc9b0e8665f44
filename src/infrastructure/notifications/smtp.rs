use std::time::Duration;

use async_trait::async_trait;
use lettre::message::MultiPart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::domain::entities::alert::Alert;
use crate::domain::ports::notifier::{NotificationError, Notifier};

/// Transport timeout covering connection, STARTTLS upgrade and delivery.
/// Bounded so an unreachable server cannot stall a scheduled run.
const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection parameters for the outbound mail relay.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub server: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub from: String,
}

impl SmtpSettings {
    /// `host:port` form used in report output.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.server, self.port)
    }
}

/// Delivers alerts over SMTP: plain connection upgraded with STARTTLS,
/// credential login when a user is configured, single recipient,
/// multipart body with plain-text and HTML parts.
pub struct SmtpNotifier {
    settings: SmtpSettings,
}

impl SmtpNotifier {
    #[must_use]
    pub const fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }

    fn build_message(&self, alert: &Alert) -> Result<Message, NotificationError> {
        let from = self
            .settings
            .from
            .parse()
            .map_err(|e| NotificationError::SendFailed(format!("invalid sender address: {e}")))?;
        let to = alert
            .recipient
            .parse()
            .map_err(|e| NotificationError::SendFailed(format!("invalid recipient address: {e}")))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(&alert.subject)
            .multipart(MultiPart::alternative_plain_html(
                alert.body_text.clone(),
                alert.body_html.clone(),
            ))
            .map_err(|e| NotificationError::SendFailed(format!("message build failed: {e}")))
    }

    fn build_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotificationError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.settings.server)
                .map_err(|e| NotificationError::ChannelUnavailable(e.to_string()))?
                .port(self.settings.port)
                .timeout(Some(SMTP_TIMEOUT));

        if !self.settings.user.is_empty() {
            builder = builder.credentials(Credentials::new(
                self.settings.user.clone(),
                self.settings.password.clone(),
            ));
        }

        Ok(builder.build())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, alert: &Alert) -> Result<(), NotificationError> {
        let message = self.build_message(alert)?;
        let mailer = self.build_transport()?;

        mailer
            .send(message)
            .await
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        info!(
            to = %alert.recipient,
            server = %self.settings.endpoint(),
            "alert mail delivered"
        );
        Ok(())
    }
}
