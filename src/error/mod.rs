//! Error types and handling for `steptree`.
//!
//! The reconstruction core (tree building, status resolution, duration
//! accumulation) is total and never returns these errors. They cover the
//! surrounding plumbing: reading reports, loading configuration, and
//! parsing status names supplied by users.
//!
//! # Design
//!
//! - Uses `thiserror` for derive-based error types
//! - Provides recovery hints for user-facing errors
//! - Provides structured JSON output for `--json` consumers

mod structured;

pub use structured::{ErrorCode, StructuredError};

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for `steptree` operations.
#[derive(Error, Debug)]
pub enum StepTreeError {
    // === Report Errors ===
    /// Report file not found at the specified path.
    #[error("Report not found at '{path}'")]
    ReportNotFound { path: PathBuf },

    /// One or more elements carry step depths that do not form a tree.
    #[error("Malformed step nesting in {elements} element(s) ({problems} problem(s))")]
    MalformedStepTree { elements: usize, problems: usize },

    // === Validation Errors ===
    /// Unknown status name.
    #[error("Invalid status: {status}")]
    InvalidStatus { status: String },

    // === Configuration Errors ===
    /// Configuration file error.
    #[error("Configuration error: {0}")]
    Config(String),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Error with additional context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// A single field validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// The reason for the validation failure.
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl StepTreeError {
    /// Human-friendly suggestion for fixing this error.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::ReportNotFound { .. } => Some("Check the report path"),
            Self::InvalidStatus { .. } => {
                Some("Valid statuses: passed, failed, skipped, pending, undefined, ambiguous")
            }
            Self::MalformedStepTree { .. } => {
                Some("Each nested step may be at most one '>' deeper than the step before it")
            }
            Self::Json(_) => Some("Reports must be Cucumber JSON: an array of features"),
            _ => None,
        }
    }

    /// Wrap any error with a short description of what was being attempted.
    #[must_use]
    pub fn with_context<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(source),
        }
    }
}

/// Result type using `StepTreeError`.
pub type Result<T> = std::result::Result<T, StepTreeError>;
