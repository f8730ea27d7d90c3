//! Snapshot loading
//!
//! Locator and run snapshots are files holding an array of records, as JSON
//! or YAML depending on the file extension.

use serde::de::DeserializeOwned;
use sondeo::{LocatorRecord, TestRunRecord};
use std::path::Path;

use crate::error::{CliError, CliResult};

/// Serialization format of a snapshot file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// JSON array
    Json,
    /// YAML sequence
    Yaml,
}

impl InputFormat {
    /// Pick the format from the file extension; anything but `.yaml`/`.yml` is JSON
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Parse an array of records in the given format
pub fn parse_records<T: DeserializeOwned>(content: &str, format: InputFormat) -> CliResult<Vec<T>> {
    let records = match format {
        InputFormat::Json => serde_json::from_str(content)?,
        InputFormat::Yaml => serde_yaml_ng::from_str(content)?,
    };
    Ok(records)
}

/// Read an array of records from a file
pub fn load_records<T: DeserializeOwned>(path: &Path) -> CliResult<Vec<T>> {
    let content =
        std::fs::read_to_string(path).map_err(|e| CliError::input(path, e.to_string()))?;
    let format = InputFormat::from_path(path);
    let records: Vec<T> = parse_records(&content, format).map_err(|e| match e {
        CliError::Json(inner) => CliError::input(path, inner.to_string()),
        CliError::Yaml(inner) => CliError::input(path, inner.to_string()),
        other => other,
    })?;
    tracing::debug!(
        path = %path.display(),
        ?format,
        count = records.len(),
        "loaded snapshot"
    );
    Ok(records)
}

/// Read a locator snapshot
pub fn load_locators(path: &Path) -> CliResult<Vec<LocatorRecord>> {
    load_records(path)
}

/// Read a run history snapshot
pub fn load_runs(path: &Path) -> CliResult<Vec<TestRunRecord>> {
    load_records(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use sondeo::{LocatorType, RunStatus};
    use std::fs;
    use tempfile::TempDir;

    mod format_tests {
        use super::*;

        #[test]
        fn test_yaml_extensions() {
            assert_eq!(InputFormat::from_path(Path::new("a.yaml")), InputFormat::Yaml);
            assert_eq!(InputFormat::from_path(Path::new("a.YML")), InputFormat::Yaml);
        }

        #[test]
        fn test_everything_else_is_json() {
            assert_eq!(InputFormat::from_path(Path::new("a.json")), InputFormat::Json);
            assert_eq!(InputFormat::from_path(Path::new("snapshot")), InputFormat::Json);
        }
    }

    mod load_tests {
        use super::*;

        #[test]
        fn test_load_locators_json() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("locators.json");
            fs::write(
                &path,
                r##"[{"locatorType": "css", "expression": "#go", "usedInTests": ["a"]}]"##,
            )
            .unwrap();

            let locators = load_locators(&path).unwrap();
            assert_eq!(locators.len(), 1);
            assert_eq!(locators[0].locator_type(), &LocatorType::Css);
            assert_eq!(locators[0].usage_count(), 1);
        }

        #[test]
        fn test_load_runs_yaml() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("runs.yml");
            fs::write(
                &path,
                "- testName: Login\n  status: failed\n  startedAt: 2026-03-01T10:00:00Z\n\
                 - testName: Login\n  status: passed\n  startedAt: 2026-03-01T11:00:00Z\n",
            )
            .unwrap();

            let runs = load_runs(&path).unwrap();
            assert_eq!(runs.len(), 2);
            assert_eq!(runs[0].status, RunStatus::Failed);
            assert_eq!(runs[1].test_name, "Login");
        }

        #[test]
        fn test_parse_error_names_file() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("broken.json");
            fs::write(&path, "{ not json").unwrap();

            let err = load_locators(&path).unwrap_err();
            assert!(matches!(err, CliError::Input { .. }));
            assert!(err.to_string().contains("broken.json"));
        }

        #[test]
        fn test_missing_file() {
            let err = load_runs(Path::new("/nonexistent/runs.json")).unwrap_err();
            assert!(matches!(err, CliError::Input { .. }));
        }
    }
}
