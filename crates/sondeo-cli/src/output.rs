//! Output formatting and status reporting

use console::{style, Term};
use serde::{Deserialize, Serialize};

use crate::error::CliResult;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Render a result as text or pretty JSON
pub fn render<T, F>(format: OutputFormat, value: &T, text: F) -> CliResult<String>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Text => Ok(text(value)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
    }
}

/// Writes results to stdout and status lines to stderr
#[derive(Debug)]
pub struct Reporter {
    out: Term,
    err: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a rendered result
    pub fn result(&self, rendered: &str) -> CliResult<()> {
        self.out.write_str(rendered)?;
        if !rendered.ends_with('\n') {
            self.out.write_line("")?;
        }
        Ok(())
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "PASS".to_string()
        };

        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Always print failures, even in quiet mode
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };

        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };

        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };

        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod output_format_tests {
        use super::*;

        #[test]
        fn test_default_format() {
            assert_eq!(OutputFormat::default(), OutputFormat::Text);
        }
    }

    mod render_tests {
        use super::*;
        use sondeo::{failure_trend, FailureTrend, Trend};

        #[test]
        fn test_render_text_uses_closure() {
            let trend = failure_trend(&[]);
            let out = render(OutputFormat::Text, &trend, sondeo::render_trend_text).unwrap();
            assert!(out.starts_with("Trend:"));
        }

        #[test]
        fn test_render_json_is_pretty() {
            let trend = failure_trend(&[]);
            let out = render(OutputFormat::Json, &trend, |_| String::new()).unwrap();
            assert!(out.contains('\n'));
            let parsed: FailureTrend = serde_json::from_str(&out).unwrap();
            assert_eq!(parsed.trend, Trend::Stable);
        }

        #[test]
        fn test_render_slice() {
            let out = render(OutputFormat::Json, &[1_u8, 2][..], |_| String::new()).unwrap();
            assert!(out.contains('1'));
        }
    }

    mod reporter_tests {
        use super::*;

        #[test]
        fn test_quiet_reporter_does_not_panic() {
            let reporter = Reporter::new(false, true);
            reporter.success("done");
            reporter.warning("careful");
            reporter.info("fyi");
            reporter.failure("broken");
        }

        #[test]
        fn test_default_reporter() {
            let reporter = Reporter::default();
            assert!(reporter.use_color);
            assert!(!reporter.quiet);
        }
    }
}
