use colored::Colorize;
use serde::Serialize;

use crate::application::config::AppConfig;
use crate::application::services::check::{CheckOutcome, CheckService};
use crate::domain::entities::reading::Reading;
use crate::domain::ports::relay::RelayStore;
use crate::domain::ports::scanner::ProcessScanner;
use crate::domain::value_objects::outcome::NotifyOutcome;
use crate::domain::value_objects::variant::MonitorVariant;
use crate::infrastructure::notifications::smtp::SmtpNotifier;

use super::{check_settings, generate_run_id, mail_of, smtp_settings};

#[derive(Serialize)]
struct CheckOutput<'a> {
    run_id: &'a str,
    variant: MonitorVariant,
    notify: NotifyOutcome,
    reading: &'a Reading,
}

/// Runs one check step: measure, publish to the relay, conditionally mail.
///
/// Prints the run id so a separate `report` invocation can be chained.
///
/// # Errors
///
/// Returns an error if scanning or the relay write fails, or if JSON
/// serialization fails. Mail-delivery failures do not fail the step.
pub async fn run_check(
    config: &AppConfig,
    scanner: &dyn ProcessScanner,
    relay: &dyn RelayStore,
    variant: MonitorVariant,
    run_id: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let run_id = run_id.unwrap_or_else(|| generate_run_id(variant));
    let notifier = SmtpNotifier::new(smtp_settings(mail_of(config, variant)));
    let settings = check_settings(config, variant);
    let service = CheckService::new(scanner, relay, &notifier);

    let outcome = match variant {
        MonitorVariant::Aggregate => {
            service
                .check_all(&run_id, &config.aggregate.watch_tag, &settings)
                .await?
        }
        MonitorVariant::SingleProcess => service.check_self(&run_id, &settings).await?,
    };

    if json {
        print_check_json(&run_id, variant, &outcome)?;
    } else {
        print_check_human(&run_id, &outcome);
    }

    Ok(())
}

fn print_check_json(
    run_id: &str,
    variant: MonitorVariant,
    outcome: &CheckOutcome,
) -> anyhow::Result<()> {
    let output = serde_json::to_string_pretty(&CheckOutput {
        run_id,
        variant,
        notify: outcome.notify,
        reading: &outcome.reading,
    })?;
    println!("{output}");
    Ok(())
}

fn print_check_human(run_id: &str, outcome: &CheckOutcome) {
    let status = match outcome.notify {
        NotifyOutcome::OkNoAlert => outcome.notify.to_string().green(),
        NotifyOutcome::AlertSent => outcome.notify.to_string().red().bold(),
        NotifyOutcome::SendFailed => outcome.notify.to_string().yellow().bold(),
    };
    println!("Run id        : {run_id}");
    println!(
        "Measured      : {:.2} MB / {:.2} MB",
        outcome.reading.memory_mb, outcome.reading.threshold_mb
    );
    println!("Outcome       : {status}");
}
