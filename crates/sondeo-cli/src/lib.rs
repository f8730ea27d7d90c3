//! Sondeo CLI Library
//!
//! Command-line host for the Sondeo test intelligence engine. Loads locator
//! and run snapshots from disk, runs the analyzers and renders the results.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod input;
mod output;

pub use commands::{
    Cli, ColorArg, Commands, ConfigArgs, DuplicatesArgs, FlakyArgs, FormatArg, HealthArgs,
    ReportArgs, RunsArgs,
};
pub use config::{load_engine_config, parse_engine_config, CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use input::{load_locators, load_runs, InputFormat};
pub use output::{render, OutputFormat, Reporter};
