use std::path::Path;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::domain::ports::scanner::ProcessScanner;
use crate::domain::value_objects::variant::MonitorVariant;
use crate::infrastructure::relay::sqlite_relay::SqliteRelay;

use super::{check::run_check, report::run_report};

/// Drive both monitoring variants on their configured intervals.
///
/// Runs until SIGINT (Ctrl+C) via [`tokio::signal::ctrl_c()`], then shuts
/// down gracefully. Configuration is re-read at every cycle so threshold
/// and mail changes apply on the next run without a restart; interval
/// changes still need one (the tickers are created at startup).
///
/// Errors during individual cycles are logged but do not stop the daemon.
///
/// # Errors
///
/// Returns an error if the initial configuration cannot be loaded.
pub async fn run_daemon(
    config_path: Option<&Path>,
    scanner: &dyn ProcessScanner,
) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    info!(
        aggregate_minutes = config.aggregate.interval_minutes,
        single_process_minutes = config.single_process.interval_minutes,
        "daemon started"
    );

    let mut aggregate_tick = tokio::time::interval(interval_of(config.aggregate.interval_minutes));
    aggregate_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut single_tick =
        tokio::time::interval(interval_of(config.single_process.interval_minutes));
    single_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = aggregate_tick.tick() => {
                run_cycle(config_path, scanner, MonitorVariant::Aggregate).await;
            }
            _ = single_tick.tick() => {
                run_cycle(config_path, scanner, MonitorVariant::SingleProcess).await;
            }
            _ = &mut shutdown => {
                info!("shutdown signal received, stopping daemon");
                break;
            }
        }
    }
    Ok(())
}

// A zero interval would make tokio::time::interval panic; clamp to one minute.
fn interval_of(minutes: u64) -> Duration {
    Duration::from_secs(minutes.saturating_mul(60).max(60))
}

async fn run_cycle(config_path: Option<&Path>, scanner: &dyn ProcessScanner, variant: MonitorVariant) {
    match cycle(config_path, scanner, variant).await {
        Ok(run_id) => info!(%variant, run_id, "cycle complete"),
        Err(e) => error!(%variant, "monitoring cycle failed: {e:#}"),
    }
}

async fn cycle(
    config_path: Option<&Path>,
    scanner: &dyn ProcessScanner,
    variant: MonitorVariant,
) -> anyhow::Result<String> {
    let config = super::load_config(config_path)?;

    let relay = SqliteRelay::new(&config.relay.path)
        .map_err(|e| anyhow::anyhow!("failed to open relay store: {e}"))?;
    if let Err(e) = relay.cleanup_old(config.relay.retention_hours) {
        warn!("failed to clean up old relay entries: {e}");
    }

    let run_id = super::generate_run_id(variant);
    run_check(&config, scanner, &relay, variant, Some(run_id.clone()), false).await?;
    run_report(&config, &relay, variant, &run_id, false)?;
    Ok(run_id)
}
