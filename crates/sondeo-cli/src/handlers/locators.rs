//! Health and duplicates command handlers

use serde::{Deserialize, Serialize};
use sondeo::{
    find_duplicates_with_config, render_duplicates_text, render_health_text, render_summary_text,
    score, summarize, HealthSummary, LocatorRecord, ScoredLocator, MAX_HEALTH_SCORE,
};

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::input::load_locators;
use crate::output::{render, Reporter};
use crate::{DuplicatesArgs, HealthArgs};

/// What `sondeo health` emits: every locator's score and the suite summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthOutput {
    /// Suite overview
    pub summary: HealthSummary,
    /// Every locator in input order
    pub locators: Vec<ScoredLocator>,
}

/// Score a locator snapshot
#[must_use]
pub fn health_output(locators: &[LocatorRecord]) -> HealthOutput {
    HealthOutput {
        summary: summarize(locators),
        locators: locators
            .iter()
            .map(|locator| ScoredLocator {
                locator: locator.clone(),
                health: score(locator),
            })
            .collect(),
    }
}

/// Render the health table followed by the summary
#[must_use]
pub fn render_health(output: &HealthOutput, detailed: bool) -> String {
    let mut text = render_health_text(&output.locators, detailed);
    text.push('\n');
    text.push_str(&render_summary_text(&output.summary));
    text
}

/// Number of locators scoring strictly below `min`
#[must_use]
pub fn below_minimum(output: &HealthOutput, min: u32) -> usize {
    output
        .locators
        .iter()
        .filter(|s| s.health.total < min)
        .count()
}

/// Execute the health command
pub fn execute_health(
    _config: &CliConfig,
    args: &HealthArgs,
    reporter: &Reporter,
) -> CliResult<()> {
    if let Some(min) = args.min {
        if min > MAX_HEALTH_SCORE {
            return Err(CliError::invalid_argument(format!(
                "--min {min} is above the highest possible score ({MAX_HEALTH_SCORE})"
            )));
        }
    }

    let locators = load_locators(&args.locators)?;
    let output = health_output(&locators);
    let rendered = render(args.format.into(), &output, |o| render_health(o, args.detailed))?;
    reporter.result(&rendered)?;

    if let Some(min) = args.min {
        let count = below_minimum(&output, min);
        if count > 0 {
            reporter.failure(&format!("{count} of {} locators below {min}", locators.len()));
            return Err(CliError::BelowMinimum { count, min });
        }
        reporter.success(&format!("All {} locators score {min} or more", locators.len()));
    }
    Ok(())
}

/// Execute the duplicates command
pub fn execute_duplicates(
    config: &CliConfig,
    args: &DuplicatesArgs,
    reporter: &Reporter,
) -> CliResult<()> {
    let mut engine = config.engine.clone();
    if let Some(threshold) = args.threshold {
        engine = engine.with_similarity_threshold(threshold);
        engine.validate()?;
    }

    let locators = load_locators(&args.locators)?;
    let groups = find_duplicates_with_config(&locators, &engine);
    tracing::info!(
        locators = locators.len(),
        groups = groups.len(),
        threshold = engine.similarity_threshold,
        "clustered locators"
    );

    let rendered = render(args.format.into(), groups.as_slice(), render_duplicates_text)?;
    reporter.result(&rendered)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::FormatArg;
    use sondeo::{HealthStatus, LocatorType};
    use std::fs;
    use tempfile::TempDir;

    fn sample() -> Vec<LocatorRecord> {
        vec![
            LocatorRecord::new(LocatorType::Role, "button").with_tests(["a", "b", "c", "d", "e"]),
            LocatorRecord::new(LocatorType::XPath, "//div[3]/span[2]/a").with_tests(["a"]),
        ]
    }

    fn write_sample(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("locators.json");
        fs::write(&path, serde_json::to_string(&sample()).unwrap()).unwrap();
        path
    }

    mod health_output_tests {
        use super::*;

        #[test]
        fn test_output_keeps_input_order() {
            let output = health_output(&sample());
            assert_eq!(output.locators.len(), 2);
            assert_eq!(output.locators[0].locator.locator_type(), &LocatorType::Role);
            assert_eq!(output.summary.locator_count, 2);
        }

        #[test]
        fn test_below_minimum() {
            let output = health_output(&sample());
            assert_eq!(below_minimum(&output, 0), 0);
            assert_eq!(below_minimum(&output, MAX_HEALTH_SCORE + 1), 2);
            let worst = output.locators[1].health.total;
            assert_eq!(below_minimum(&output, worst), 0);
            assert_eq!(below_minimum(&output, worst + 1), 1);
        }

        #[test]
        fn test_render_health_includes_summary() {
            let output = health_output(&sample());
            let text = render_health(&output, false);
            assert!(text.contains("LOCATOR HEALTH"));
            assert!(text.contains("Average score"));
            assert!(!text.contains("Detailed Breakdown"));
            assert!(render_health(&output, true).contains("Detailed Breakdown"));
        }

        #[test]
        fn test_json_round_trip() {
            let output = health_output(&sample());
            let json = serde_json::to_string(&output).unwrap();
            let parsed: HealthOutput = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed.locators[0].health.status, HealthStatus::Excellent);
        }
    }

    mod execute_tests {
        use super::*;

        #[test]
        fn test_health_min_not_met() {
            let dir = TempDir::new().unwrap();
            let args = HealthArgs {
                locators: write_sample(&dir),
                format: FormatArg::Json,
                min: Some(100),
                detailed: false,
            };
            let err = execute_health(&CliConfig::new(), &args, &Reporter::new(false, true))
                .unwrap_err();
            assert!(matches!(err, CliError::BelowMinimum { count: 1, min: 100 }));
        }

        #[test]
        fn test_health_min_out_of_range() {
            let args = HealthArgs {
                locators: "unused.json".into(),
                format: FormatArg::Text,
                min: Some(200),
                detailed: false,
            };
            let err = execute_health(&CliConfig::new(), &args, &Reporter::new(false, true))
                .unwrap_err();
            assert!(matches!(err, CliError::InvalidArgument { .. }));
        }

        #[test]
        fn test_duplicates_rejects_bad_threshold() {
            let dir = TempDir::new().unwrap();
            let args = DuplicatesArgs {
                locators: write_sample(&dir),
                format: FormatArg::Text,
                threshold: Some(150.0),
            };
            let err = execute_duplicates(&CliConfig::new(), &args, &Reporter::new(false, true))
                .unwrap_err();
            assert!(matches!(err, CliError::Sondeo(_)));
        }

        #[test]
        fn test_duplicates_succeeds() {
            let dir = TempDir::new().unwrap();
            let args = DuplicatesArgs {
                locators: write_sample(&dir),
                format: FormatArg::Json,
                threshold: None,
            };
            let result = execute_duplicates(&CliConfig::new(), &args, &Reporter::new(false, true));
            assert!(result.is_ok());
        }
    }
}
