//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Equipment failure-risk monitor
///
/// Sample equipment sensors, score failure risk and manage maintenance alerts.
#[derive(Parser, Debug)]
#[command(name = "maintctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "MAINTCTL_CONFIG")]
    pub config: Option<String>,

    /// Equipment catalog file (TOML) instead of the demo fleet
    #[arg(long, global = true)]
    pub catalog: Option<String>,

    /// Seed for reproducible sensor and scoring noise
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List catalogued equipment
    Equipment,

    /// Inspect and acknowledge alerts
    Alerts(AlertsArgs),

    /// Generate synthetic sensor samples
    Sample(SampleArgs),

    /// Sample equipment and score its failure risk
    Classify(ClassifyArgs),

    /// Sample equipment periodically until stopped
    Monitor(MonitorArgs),

    /// Show the effective configuration
    Config,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for alert commands
#[derive(Parser, Debug)]
pub struct AlertsArgs {
    #[command(subcommand)]
    pub command: AlertsCommands,
}

/// Alert subcommands
#[derive(Subcommand, Debug)]
pub enum AlertsCommands {
    /// List alerts
    List {
        /// Include acknowledged alerts
        #[arg(short, long)]
        all: bool,

        /// Only show alerts of this severity
        #[arg(long, value_enum)]
        severity: Option<SeverityArg>,
    },

    /// Acknowledge an alert
    Ack {
        /// Alert id
        alert_id: String,
    },
}

/// Severity filter argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityArg {
    Low,
    Medium,
    High,
    Critical,
}

impl From<SeverityArg> for crate::domain::Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Low => Self::Low,
            SeverityArg::Medium => Self::Medium,
            SeverityArg::High => Self::High,
            SeverityArg::Critical => Self::Critical,
        }
    }
}

/// Arguments for the sample command
#[derive(Parser, Debug)]
pub struct SampleArgs {
    /// Equipment id (defaults to the configured equipment)
    #[arg(short, long)]
    pub equipment: Option<String>,

    /// Number of samples to generate
    #[arg(short = 'n', long, default_value = "1",
          value_parser = clap::value_parser!(u32).range(1..=10_000))]
    pub count: u32,
}

/// Arguments for the classify command
#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// Equipment id (defaults to the configured equipment)
    #[arg(short, long)]
    pub equipment: Option<String>,

    /// Samples to collect before scoring
    #[arg(short = 'n', long, default_value = "1",
          value_parser = clap::value_parser!(u32).range(1..=10_000))]
    pub samples: u32,
}

/// Arguments for the monitor command
#[derive(Parser, Debug)]
pub struct MonitorArgs {
    /// Equipment id (defaults to the configured equipment)
    #[arg(short, long)]
    pub equipment: Option<String>,

    /// Stop after this many seconds (runs until Ctrl+C otherwise)
    #[arg(short, long)]
    pub duration: Option<u64>,

    /// Sample interval in milliseconds
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Classify after every N samples
    #[arg(long, default_value = "5")]
    pub classify_every: u32,

    /// Append samples as JSON lines to this file
    #[arg(long)]
    pub telemetry: Option<String>,
}

/// Output format for CLI commands
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
