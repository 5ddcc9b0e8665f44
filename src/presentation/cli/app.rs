use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// memsentry — memory watchdog
///
/// Measures resident memory of a tagged process group (or of the
/// invoking process), publishes the reading to a run-scoped relay and
/// mails an alert when the configured threshold is exceeded.
#[derive(Parser, Debug)]
#[command(name = "memsentry")]
#[command(version, about, long_about)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to custom config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Measure, publish, and conditionally alert (one check step)
    #[command(alias = "c")]
    Check {
        /// Monitoring variant (aggregate, self)
        variant: String,

        /// Run identifier shared with the report step (generated when omitted)
        #[arg(long)]
        run_id: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize the reading published for a run
    #[command(alias = "r")]
    Report {
        /// Monitoring variant (aggregate, self)
        variant: String,

        /// Run identifier used by the preceding check step
        #[arg(long)]
        run_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run one full check → report chain
    Run {
        /// Monitoring variant (aggregate, self)
        variant: String,
    },

    /// Drive both variants on their configured intervals
    #[command(alias = "d")]
    Daemon,
}
