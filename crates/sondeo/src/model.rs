//! Input records supplied by the host: locators and test runs.
//!
//! Both are read-only snapshots from the analyzers' point of view. A locator's
//! usage count is always derived from its set of referencing tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::result::SondeoError;

/// Strategy a locator uses to find its element.
///
/// Declared from most to least structurally stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LocatorType {
    /// ARIA role (`getByRole`)
    Role,
    /// Form label (`getByLabel`)
    Label,
    /// Input placeholder (`getByPlaceholder`)
    Placeholder,
    /// `data-testid` attribute
    TestId,
    /// Visible text content
    Text,
    /// CSS selector
    Css,
    /// XPath expression
    XPath,
    /// Any type name this engine does not know
    Other(String),
}

impl LocatorType {
    /// Every known type, most stable first
    pub const KNOWN: [Self; 7] = [
        Self::Role,
        Self::Label,
        Self::Placeholder,
        Self::TestId,
        Self::Text,
        Self::Css,
        Self::XPath,
    ];

    /// Wire name of the type
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Role => "role",
            Self::Label => "label",
            Self::Placeholder => "placeholder",
            Self::TestId => "testId",
            Self::Text => "text",
            Self::Css => "css",
            Self::XPath => "xpath",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for LocatorType {
    fn from(name: &str) -> Self {
        match name {
            "role" => Self::Role,
            "label" => Self::Label,
            "placeholder" => Self::Placeholder,
            "testId" => Self::TestId,
            "text" => Self::Text,
            "css" => Self::Css,
            "xpath" => Self::XPath,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for LocatorType {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<LocatorType> for String {
    fn from(locator_type: LocatorType) -> Self {
        locator_type.as_str().to_string()
    }
}

impl fmt::Display for LocatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One distinct element-locating expression used by the test suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatorRecord {
    /// Host-side identifier, if the store has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    locator_type: LocatorType,
    expression: String,
    #[serde(default)]
    used_in_tests: BTreeSet<String>,
}

impl LocatorRecord {
    /// Create a locator that no test references yet
    #[must_use]
    pub fn new(locator_type: LocatorType, expression: impl Into<String>) -> Self {
        Self {
            id: None,
            locator_type,
            expression: expression.into(),
            used_in_tests: BTreeSet::new(),
        }
    }

    /// Set the host-side identifier
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add referencing tests
    #[must_use]
    pub fn with_tests<I, S>(mut self, tests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.used_in_tests.extend(tests.into_iter().map(Into::into));
        self
    }

    /// Record one more referencing test. Returns false if it was already known.
    pub fn add_test(&mut self, test: impl Into<String>) -> bool {
        self.used_in_tests.insert(test.into())
    }

    /// Host-side identifier
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Locator strategy
    #[must_use]
    pub fn locator_type(&self) -> &LocatorType {
        &self.locator_type
    }

    /// The literal locator string
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Tests referencing this locator
    #[must_use]
    pub fn used_in_tests(&self) -> &BTreeSet<String> {
        &self.used_in_tests
    }

    /// Number of distinct tests referencing this locator
    #[must_use]
    pub fn usage_count(&self) -> usize {
        self.used_in_tests.len()
    }

    /// Short `type:expression` label used in reports
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}:{}", self.locator_type, self.expression)
    }
}

/// Outcome of one test run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Test passed
    Passed,
    /// Test failed
    Failed,
    /// Test has not finished
    Running,
    /// Test was skipped
    Skipped,
}

impl RunStatus {
    /// Wire name of the status
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Running => "running",
            Self::Skipped => "skipped",
        }
    }
}

impl FromStr for RunStatus {
    type Err = SondeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "passed" => Ok(Self::Passed),
            "failed" => Ok(Self::Failed),
            "running" => Ok(Self::Running),
            "skipped" => Ok(Self::Skipped),
            other => Err(SondeoError::UnknownStatus {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assertion-level detail captured for a failed run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionFailure {
    /// Kind of assertion, e.g. "toBeVisible" or "Timeout waiting for selector"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assertion_type: Option<String>,
    /// What the assertion was aimed at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Expected value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// Observed value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

impl AssertionFailure {
    /// Create a failure with only an assertion type
    #[must_use]
    pub fn of_type(assertion_type: impl Into<String>) -> Self {
        Self {
            assertion_type: Some(assertion_type.into()),
            ..Self::default()
        }
    }

    /// Set the target
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// One historical execution of a named test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRunRecord {
    /// Host-side run identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Test name, shared by every run of the same test
    pub test_name: String,
    /// Run outcome
    pub status: RunStatus,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Assertion detail, in the order the failures were raised
    #[serde(default)]
    pub assertion_failures: Vec<AssertionFailure>,
}

impl TestRunRecord {
    /// Create a run record with no assertion detail
    #[must_use]
    pub fn new(test_name: impl Into<String>, status: RunStatus, started_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            test_name: test_name.into(),
            status,
            started_at,
            duration_ms: None,
            assertion_failures: Vec::new(),
        }
    }

    /// Set the run identifier
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Append an assertion failure
    #[must_use]
    pub fn with_assertion_failure(mut self, failure: AssertionFailure) -> Self {
        self.assertion_failures.push(failure);
        self
    }

    /// Whether the run failed
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.status == RunStatus::Failed
    }
}
