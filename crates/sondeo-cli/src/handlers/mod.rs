//! Command handlers - kept out of main.rs for testability
//!
//! Each handler loads its snapshot, runs the engine and hands the rendered
//! result to the [`Reporter`](crate::Reporter).

pub mod config;
pub mod locators;
pub mod report;
pub mod runs;

pub use config::{execute_config, render_engine_config};
pub use locators::{
    below_minimum, execute_duplicates, execute_health, health_output, render_health,
    HealthOutput,
};
pub use report::execute_report;
pub use runs::{execute_failures, execute_flaky, execute_trend};
