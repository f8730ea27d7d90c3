//! Report command handler

use sondeo::{render_report_json, render_report_text, IntelligenceReport};
use std::fs;

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::input::{load_locators, load_runs};
use crate::output::{OutputFormat, Reporter};
use crate::ReportArgs;

/// Render a report in the requested format
pub fn render_report(report: &IntelligenceReport, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Text => Ok(render_report_text(report)),
        OutputFormat::Json => Ok(render_report_json(report)?),
    }
}

/// Execute the report command
pub fn execute_report(config: &CliConfig, args: &ReportArgs, reporter: &Reporter) -> CliResult<()> {
    let locators = load_locators(&args.locators)?;
    let runs = load_runs(&args.runs)?;
    let report = IntelligenceReport::build_with_config(&locators, &runs, &config.engine);
    let rendered = render_report(&report, args.format.into())?;

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, rendered)?;
            reporter.success(&format!("Report written to {}", path.display()));
            Ok(())
        }
        None => reporter.result(&rendered),
    }
}
