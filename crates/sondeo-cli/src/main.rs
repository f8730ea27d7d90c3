//! Sondeo CLI: test intelligence from suite snapshots
//!
//! ## Usage
//!
//! ```bash
//! sondeo health locators.json --min 60        # Gate on locator health
//! sondeo duplicates locators.yaml             # Near-duplicate locators
//! sondeo flaky runs.json --format json        # Flaky tests as JSON
//! sondeo report --locators l.json --runs r.json -o report.json
//! ```

use clap::Parser;
use sondeo_cli::{
    handlers, load_engine_config, Cli, CliConfig, CliResult, ColorChoice, Commands, Reporter,
    Verbosity,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Build configuration from CLI args
    let config = build_config(&cli)?;
    init_tracing(config.verbosity);

    let use_color = config.color.should_color();
    console::set_colors_enabled(use_color);
    console::set_colors_enabled_stderr(use_color);
    let reporter = Reporter::new(use_color, config.verbosity.is_quiet());

    match &cli.command {
        Commands::Health(args) => handlers::execute_health(&config, args, &reporter),
        Commands::Duplicates(args) => handlers::execute_duplicates(&config, args, &reporter),
        Commands::Failures(args) => handlers::execute_failures(&config, args, &reporter),
        Commands::Flaky(args) => handlers::execute_flaky(&config, args, &reporter),
        Commands::Trend(args) => handlers::execute_trend(&config, args, &reporter),
        Commands::Report(args) => handlers::execute_report(&config, args, &reporter),
        Commands::Config(args) => handlers::execute_config(&config, args, &reporter),
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    let color: ColorChoice = cli.color.clone().into();

    let mut config = CliConfig::new().with_verbosity(verbosity).with_color(color);
    if let Some(path) = &cli.config {
        config = config.with_engine(load_engine_config(path)?);
    }
    Ok(config)
}

/// Log to stderr; `RUST_LOG` wins over the `-v` count
fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.default_filter()));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
