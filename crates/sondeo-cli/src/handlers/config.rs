//! Config command handler

use sondeo::EngineConfig;

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Reporter;
use crate::ConfigArgs;

/// Render engine thresholds as YAML, the format `--config` accepts
pub fn render_engine_config(engine: &EngineConfig) -> CliResult<String> {
    Ok(serde_yaml_ng::to_string(engine)?)
}

/// Execute the config command
pub fn execute_config(config: &CliConfig, args: &ConfigArgs, reporter: &Reporter) -> CliResult<()> {
    let rendered = if args.defaults {
        render_engine_config(&EngineConfig::default())?
    } else {
        render_engine_config(&config.engine)?
    };
    reporter.result(&rendered)
}
