//! Core data types for `steptree`.
//!
//! These mirror the Cucumber JSON report format and deserialize directly
//! from it:
//! - `Status` - Outcome of a step or hook, ordered by severity
//! - `TestResult` - Outcome plus elapsed time and error message
//! - `Step` - One reported step, possibly carrying a `>` depth marker
//! - `Hook` - A before/after hook execution
//! - `Element` - A scenario or background with its steps and hooks
//! - `Feature` - A feature file with its elements
//!
//! Records are plain owned values. Derived values (resolved statuses,
//! accumulated duration, the nested step tree) are computed once by
//! [`Element::finalize`] and live on [`crate::aggregate::FinalizedElement`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of a step or hook.
///
/// Variants are declared in ascending severity, so the derived `Ord` is the
/// resolution ranking: `Failed > Ambiguous > Pending > Undefined > Skipped > Passed`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Passed,
    Skipped,
    Undefined,
    Pending,
    Ambiguous,
    Failed,
}

impl Status {
    /// All statuses in report column order.
    pub const ALL: [Self; 6] = [
        Self::Passed,
        Self::Failed,
        Self::Skipped,
        Self::Pending,
        Self::Undefined,
        Self::Ambiguous,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::Pending => "pending",
            Self::Undefined => "undefined",
            Self::Ambiguous => "ambiguous",
        }
    }

    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = crate::error::StepTreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "passed" => Ok(Self::Passed),
            "failed" => Ok(Self::Failed),
            "skipped" => Ok(Self::Skipped),
            "pending" => Ok(Self::Pending),
            "undefined" => Ok(Self::Undefined),
            "ambiguous" => Ok(Self::Ambiguous),
            other => Err(crate::error::StepTreeError::InvalidStatus {
                status: other.to_string(),
            }),
        }
    }
}

/// Result of executing a step or hook.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestResult {
    pub status: Status,

    /// Elapsed time in nanoseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl TestResult {
    #[must_use]
    pub const fn new(status: Status, duration: u64) -> Self {
        Self {
            status,
            duration: Some(duration),
            error_message: None,
        }
    }
}

/// Glue code location a step or hook was matched to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Match {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// A tag attached to a feature or element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// Anything that carries a [`TestResult`].
pub trait Reported {
    fn result(&self) -> &TestResult;

    fn status(&self) -> Status {
        self.result().status
    }

    /// Elapsed nanoseconds; absent durations count as zero.
    fn duration(&self) -> u64 {
        self.result().duration.unwrap_or(0)
    }
}

/// One reported step.
///
/// Nested steps carry their depth as a leading run of `>` in `keyword`
/// (see [`crate::tree::step_depth`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Step {
    #[serde(default)]
    pub keyword: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    pub result: TestResult,

    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub matched: Option<Match>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output: Vec<String>,
}

impl Step {
    /// Build a step with only the fields the core looks at.
    #[must_use]
    pub fn new(keyword: impl Into<String>, name: impl Into<String>, result: TestResult) -> Self {
        Self {
            keyword: keyword.into(),
            name: name.into(),
            line: None,
            result,
            matched: None,
            output: Vec::new(),
        }
    }
}

impl Reported for Step {
    fn result(&self) -> &TestResult {
        &self.result
    }
}

/// A before/after hook execution. Hooks never nest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hook {
    pub result: TestResult,

    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub matched: Option<Match>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output: Vec<String>,
}

impl Hook {
    #[must_use]
    pub const fn new(result: TestResult) -> Self {
        Self {
            result,
            matched: None,
            output: Vec::new(),
        }
    }
}

impl Reported for Hook {
    fn result(&self) -> &TestResult {
        &self.result
    }
}

const SCENARIO_TYPE: &str = "scenario";
const BACKGROUND_TYPE: &str = "background";

/// A reported scenario or background, before finalization.
///
/// `steps` is the flat sequence exactly as the report lists it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Element {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    /// `scenario` or `background`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,

    #[serde(default)]
    pub keyword: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    /// Scenario start time (cucumber-jvm 4.3+).
    #[serde(
        rename = "start_timestamp",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub steps: Vec<Step>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub before: Vec<Hook>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub after: Vec<Hook>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl Element {
    #[must_use]
    pub fn is_scenario(&self) -> bool {
        self.element_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case(SCENARIO_TYPE))
    }

    #[must_use]
    pub fn is_background(&self) -> bool {
        self.element_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case(BACKGROUND_TYPE))
    }
}

/// A reported feature file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub keyword: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,

    #[serde(default)]
    pub elements: Vec<Element>,
}
