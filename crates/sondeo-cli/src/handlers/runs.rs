//! Failures, flaky and trend command handlers

use sondeo::{
    analyze_failures, detect_flaky_tests_with_config, failure_trend_with_config,
    render_failures_text, render_flaky_text, render_trend_text,
};

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::input::load_runs;
use crate::output::{render, Reporter};
use crate::{FlakyArgs, RunsArgs};

/// Execute the failures command
pub fn execute_failures(
    _config: &CliConfig,
    args: &RunsArgs,
    reporter: &Reporter,
) -> CliResult<()> {
    let runs = load_runs(&args.runs)?;
    let analyses = analyze_failures(&runs);
    tracing::info!(runs = runs.len(), categories = analyses.len(), "analyzed failures");

    let rendered = render(args.format.into(), analyses.as_slice(), render_failures_text)?;
    reporter.result(&rendered)
}

/// Execute the flaky command
pub fn execute_flaky(config: &CliConfig, args: &FlakyArgs, reporter: &Reporter) -> CliResult<()> {
    let mut engine = config.engine.clone();
    if let Some(min_runs) = args.min_runs {
        engine = engine.with_min_runs_for_flakiness(min_runs);
    }

    let runs = load_runs(&args.runs)?;
    let reports = detect_flaky_tests_with_config(&runs, &engine);
    tracing::info!(runs = runs.len(), flaky = reports.len(), "detected flaky tests");

    let rendered = render(args.format.into(), reports.as_slice(), render_flaky_text)?;
    reporter.result(&rendered)?;
    if !reports.is_empty() {
        reporter.warning(&format!("{} flaky test(s)", reports.len()));
    }
    Ok(())
}

/// Execute the trend command
pub fn execute_trend(config: &CliConfig, args: &RunsArgs, reporter: &Reporter) -> CliResult<()> {
    let runs = load_runs(&args.runs)?;
    if config.verbosity.is_verbose() && runs.len() < config.engine.min_runs_for_trend {
        reporter.info(&format!(
            "Only {} run(s); at least {} are needed for a trend",
            runs.len(),
            config.engine.min_runs_for_trend
        ));
    }
    let trend = failure_trend_with_config(&runs, &config.engine);

    let rendered = render(args.format.into(), &trend, render_trend_text)?;
    reporter.result(&rendered)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::FormatArg;
    use std::fs;
    use tempfile::TempDir;

    fn runs_json(outcomes: &[(&str, &str, u32)]) -> String {
        let items: Vec<String> = outcomes
            .iter()
            .map(|(name, status, hour)| {
                format!(
                    r#"{{"testName":"{name}","status":"{status}","startedAt":"2026-05-01T{hour:02}:00:00Z"}}"#
                )
            })
            .collect();
        format!("[{}]", items.join(","))
    }

    fn runs_file(dir: &TempDir, outcomes: &[(&str, &str, u32)]) -> std::path::PathBuf {
        let path = dir.path().join("runs.json");
        fs::write(&path, runs_json(outcomes)).unwrap();
        path
    }

    fn quiet() -> Reporter {
        Reporter::new(false, true)
    }

    #[test]
    fn test_failures_handler() {
        let dir = TempDir::new().unwrap();
        let args = RunsArgs {
            runs: runs_file(&dir, &[("A", "failed", 1), ("A", "passed", 2)]),
            format: FormatArg::Text,
        };
        assert!(execute_failures(&CliConfig::new(), &args, &quiet()).is_ok());
    }

    #[test]
    fn test_flaky_handler_with_min_runs_override() {
        let dir = TempDir::new().unwrap();
        let args = FlakyArgs {
            runs: runs_file(&dir, &[("A", "failed", 1), ("A", "passed", 2)]),
            format: FormatArg::Json,
            min_runs: Some(2),
        };
        assert!(execute_flaky(&CliConfig::new(), &args, &quiet()).is_ok());
    }

    #[test]
    fn test_trend_handler_short_history() {
        let dir = TempDir::new().unwrap();
        let args = RunsArgs {
            runs: runs_file(&dir, &[("A", "failed", 1)]),
            format: FormatArg::Text,
        };
        assert!(execute_trend(&CliConfig::new(), &args, &quiet()).is_ok());
    }

    #[test]
    fn test_bad_status_is_an_input_error() {
        let dir = TempDir::new().unwrap();
        let args = RunsArgs {
            runs: runs_file(&dir, &[("A", "exploded", 1)]),
            format: FormatArg::Text,
        };
        let err = execute_failures(&CliConfig::new(), &args, &quiet()).unwrap_err();
        assert!(matches!(err, crate::CliError::Input { .. }));
    }
}
