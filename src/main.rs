use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use memsentry::application::config::AppConfig;
use memsentry::domain::value_objects::variant::MonitorVariant;
use memsentry::infrastructure::relay::sqlite_relay::SqliteRelay;
use memsentry::infrastructure::scanners::sysinfo_scanner::SysinfoScanner;
use memsentry::presentation::cli::app::{Cli, Commands};
use memsentry::presentation::cli::commands::check::run_check;
use memsentry::presentation::cli::commands::daemon::run_daemon;
use memsentry::presentation::cli::commands::report::run_report;
use memsentry::presentation::cli::commands::run::run_once;

fn print_banner() {
    println!("{}", "━".repeat(40).cyan());
    println!("{}", "  MEMSENTRY — memory watchdog".bold().cyan());
    println!("{}", "━".repeat(40).cyan());
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn open_relay(config: &AppConfig) -> anyhow::Result<SqliteRelay> {
    let relay = SqliteRelay::new(&config.relay.path)
        .map_err(|e| anyhow::anyhow!("failed to open relay store: {e}"))?;
    if let Err(e) = relay.cleanup_old(config.relay.retention_hours) {
        tracing::warn!("failed to clean up old relay entries: {e}");
    }
    Ok(relay)
}

fn parse_variant(raw: &str) -> anyhow::Result<MonitorVariant> {
    raw.parse().map_err(|e: String| anyhow::anyhow!(e))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    // Load configuration
    let config = if let Some(ref path) = cli.config {
        AppConfig::load_or_create(path)?
    } else {
        AppConfig::load()?
    };

    // Manual DI — main.rs is the only place that knows concrete types
    let scanner = SysinfoScanner::new();

    match cli.command {
        Commands::Check {
            variant,
            run_id,
            json,
        } => {
            let relay = open_relay(&config)?;
            run_check(
                &config,
                &scanner,
                &relay,
                parse_variant(&variant)?,
                run_id,
                json,
            )
            .await?;
        }
        Commands::Report {
            variant,
            run_id,
            json,
        } => {
            let relay = open_relay(&config)?;
            run_report(&config, &relay, parse_variant(&variant)?, &run_id, json)?;
        }
        Commands::Run { variant } => {
            let relay = open_relay(&config)?;
            run_once(&config, &scanner, &relay, parse_variant(&variant)?).await?;
        }
        Commands::Daemon => {
            print_banner();
            run_daemon(cli.config.as_deref(), &scanner).await?;
        }
    }

    Ok(())
}
