use crate::application::config::AppConfig;
use crate::domain::ports::relay::RelayStore;
use crate::domain::ports::scanner::ProcessScanner;
use crate::domain::value_objects::variant::MonitorVariant;

use super::{check::run_check, generate_run_id, report::run_report};

/// Runs one full check → report chain in a single invocation.
///
/// The two steps share a generated run id; the report step only runs
/// once the check step has published its reading.
///
/// # Errors
///
/// Returns an error if either step fails (mail delivery excepted, which
/// is absorbed by the check step).
pub async fn run_once(
    config: &AppConfig,
    scanner: &dyn ProcessScanner,
    relay: &dyn RelayStore,
    variant: MonitorVariant,
) -> anyhow::Result<()> {
    let run_id = generate_run_id(variant);

    run_check(
        config,
        scanner,
        relay,
        variant,
        Some(run_id.clone()),
        false,
    )
    .await?;
    run_report(config, relay, variant, &run_id, false)
}
