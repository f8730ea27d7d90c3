//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Sondeo: locator health, duplicate locators and flaky tests from suite snapshots
#[derive(Parser, Debug)]
#[command(name = "sondeo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Engine thresholds file (YAML)
    #[arg(long, global = true, env = "SONDEO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score the health of every locator
    Health(HealthArgs),

    /// Cluster near-duplicate locators
    Duplicates(DuplicatesArgs),

    /// Group failed runs by failure category
    Failures(RunsArgs),

    /// Find tests that both pass and fail
    Flaky(FlakyArgs),

    /// Compare recent failure rate with the older half of the history
    Trend(RunsArgs),

    /// Run every analyzer over one snapshot
    Report(ReportArgs),

    /// Show the effective engine thresholds
    Config(ConfigArgs),
}

/// Arguments for the health command
#[derive(Parser, Debug)]
pub struct HealthArgs {
    /// Locator snapshot (JSON or YAML array)
    pub locators: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: FormatArg,

    /// Fail if any locator scores below this (0-105)
    #[arg(long)]
    pub min: Option<u32>,

    /// Show the factor breakdown and recommendations per locator
    #[arg(long)]
    pub detailed: bool,
}

/// Arguments for the duplicates command
#[derive(Parser, Debug)]
pub struct DuplicatesArgs {
    /// Locator snapshot (JSON or YAML array)
    pub locators: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: FormatArg,

    /// Override the cluster similarity threshold (0-100)
    #[arg(long)]
    pub threshold: Option<f64>,
}

/// Arguments for commands that read only a run history
#[derive(Parser, Debug)]
pub struct RunsArgs {
    /// Run history snapshot (JSON or YAML array)
    pub runs: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: FormatArg,
}

/// Arguments for the flaky command
#[derive(Parser, Debug)]
pub struct FlakyArgs {
    /// Run history snapshot (JSON or YAML array)
    pub runs: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: FormatArg,

    /// Override the minimum number of runs per test
    #[arg(long)]
    pub min_runs: Option<usize>,
}

/// Arguments for the report command
#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Locator snapshot (JSON or YAML array)
    #[arg(long)]
    pub locators: PathBuf,

    /// Run history snapshot (JSON or YAML array)
    #[arg(long)]
    pub runs: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: FormatArg,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Show built-in defaults instead of the effective configuration
    #[arg(long)]
    pub defaults: bool,
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

impl From<FormatArg> for crate::output::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
