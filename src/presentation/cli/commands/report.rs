use anyhow::Context;

use crate::application::config::AppConfig;
use crate::application::services::report::build_report;
use crate::domain::ports::relay::RelayStore;
use crate::domain::value_objects::variant::MonitorVariant;
use crate::presentation::cli::formatters::report_fmt;

use super::mail_of;

/// Summarizes the reading published for `run_id` as the fixed-width
/// report block (or JSON).
///
/// # Errors
///
/// Fails when no reading was published for the run: a report without
/// data is surfaced to the scheduler, never rendered as "no alert".
pub fn run_report(
    config: &AppConfig,
    relay: &dyn RelayStore,
    variant: MonitorVariant,
    run_id: &str,
    json: bool,
) -> anyhow::Result<()> {
    let mail = mail_of(config, variant);
    let summary = build_report(relay, run_id, &mail.endpoint(), &mail.email_to)
        .with_context(|| format!("report step for run '{run_id}' failed"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", report_fmt::render(&summary));
    }

    Ok(())
}
