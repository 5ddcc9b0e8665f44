pub mod check;
pub mod daemon;
pub mod report;
pub mod run;

use std::path::Path;

use chrono::Utc;

use crate::application::config::{AppConfig, MailConfig};
use crate::application::services::check::CheckSettings;
use crate::domain::value_objects::variant::MonitorVariant;
use crate::infrastructure::notifications::smtp::SmtpSettings;

/// Load configuration from the given path, or from the default location
/// (creating a default file on first run).
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(p) => AppConfig::load_or_create(p),
        None => AppConfig::load(),
    }
}

/// Run id used when the scheduler does not supply one.
pub(crate) fn generate_run_id(variant: MonitorVariant) -> String {
    format!("{}-{}", variant.slug(), Utc::now().format("%Y%m%dT%H%M%S%.3fZ"))
}

pub(crate) fn mail_of(config: &AppConfig, variant: MonitorVariant) -> &MailConfig {
    match variant {
        MonitorVariant::Aggregate => &config.aggregate.mail,
        MonitorVariant::SingleProcess => &config.single_process.mail,
    }
}

pub(crate) fn smtp_settings(mail: &MailConfig) -> SmtpSettings {
    SmtpSettings {
        server: mail.smtp_server.clone(),
        port: mail.smtp_port,
        user: mail.smtp_user.clone(),
        password: mail.smtp_password.clone(),
        from: mail.email_from.clone(),
    }
}

pub(crate) fn check_settings(config: &AppConfig, variant: MonitorVariant) -> CheckSettings {
    match variant {
        MonitorVariant::Aggregate => CheckSettings {
            threshold_mb: config.aggregate.threshold_mb,
            recipient: config.aggregate.mail.email_to.clone(),
        },
        MonitorVariant::SingleProcess => CheckSettings {
            threshold_mb: config.single_process.threshold_mb,
            recipient: config.single_process.mail.email_to.clone(),
        },
    }
}
