//! Structured error output.
//!
//! Provides machine-parseable error information with a stable error code,
//! a hint for self-correction, and optional context data. Used when the
//! CLI runs with `--json` or stdout is not a terminal.

use crate::error::StepTreeError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Machine-readable error codes.
///
/// Format: `SCREAMING_SNAKE_CASE` for easy parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // === Report Errors (exit code 2) ===
    /// Report file not found
    ReportNotFound,
    /// Step depths do not form a tree
    MalformedStepTree,

    // === Validation Errors (exit code 4) ===
    /// Unknown status name
    InvalidStatus,

    // === Config Errors (exit code 7) ===
    /// Configuration error
    ConfigError,

    // === I/O Errors (exit code 8) ===
    /// File I/O error
    IoError,
    /// JSON serialization error
    JsonError,
    /// YAML parsing error
    YamlError,

    // === Internal Errors (exit code 1) ===
    /// Unexpected internal error
    InternalError,
}

impl ErrorCode {
    /// Get the string representation for JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ReportNotFound => "REPORT_NOT_FOUND",
            Self::MalformedStepTree => "MALFORMED_STEP_TREE",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::YamlError => "YAML_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Get the exit code for this error category.
    ///
    /// - 1: Internal/unknown errors
    /// - 2: Report errors
    /// - 4: Validation errors
    /// - 7: Config errors
    /// - 8: I/O errors
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ReportNotFound | Self::MalformedStepTree => 2,
            Self::InvalidStatus => 4,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError | Self::YamlError => 8,
            Self::InternalError => 1,
        }
    }
}

/// Structured error for machine-parseable output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Machine-readable error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional hint for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Additional context data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl StructuredError {
    /// Create a new structured error from a `StepTreeError`.
    #[must_use]
    pub fn from_error(err: &StepTreeError) -> Self {
        let (code, context) = Self::extract_code_and_context(err);
        Self {
            code,
            message: err.to_string(),
            hint: err.suggestion().map(str::to_string),
            context,
        }
    }

    /// Serialize to JSON value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "error": {
                "code": self.code.as_str(),
                "message": self.message,
                "hint": self.hint,
                "context": self.context,
            }
        })
    }

    /// Format for human-readable output.
    #[must_use]
    pub fn to_human(&self, color: bool) -> String {
        let mut output = String::new();

        if color {
            output.push_str("\x1b[31mError:\x1b[0m ");
        } else {
            output.push_str("Error: ");
        }

        output.push_str(&self.message);

        if let Some(hint) = &self.hint {
            output.push('\n');
            if color {
                output.push_str("\x1b[33mHint:\x1b[0m ");
            } else {
                output.push_str("Hint: ");
            }
            output.push_str(hint);
        }

        output
    }

    fn extract_code_and_context(err: &StepTreeError) -> (ErrorCode, Option<Value>) {
        match err {
            StepTreeError::ReportNotFound { path } => (
                ErrorCode::ReportNotFound,
                Some(json!({"path": path.display().to_string()})),
            ),
            StepTreeError::MalformedStepTree { elements, problems } => (
                ErrorCode::MalformedStepTree,
                Some(json!({"elements": elements, "problems": problems})),
            ),
            StepTreeError::InvalidStatus { status } => {
                (ErrorCode::InvalidStatus, Some(json!({"provided": status})))
            }
            StepTreeError::Config(_) => (ErrorCode::ConfigError, None),
            StepTreeError::Io(_) => (ErrorCode::IoError, None),
            StepTreeError::Json(_) => (ErrorCode::JsonError, None),
            StepTreeError::Yaml(_) => (ErrorCode::YamlError, None),
            StepTreeError::WithContext { context, source } => (
                Self::code_for_source(source.as_ref()),
                Some(json!({"context": context})),
            ),
        }
    }

    /// Classify a wrapped error by what it actually is.
    fn code_for_source(source: &(dyn std::error::Error + Send + Sync + 'static)) -> ErrorCode {
        if source.is::<std::io::Error>() {
            ErrorCode::IoError
        } else if source.is::<serde_json::Error>() {
            ErrorCode::JsonError
        } else if source.is::<serde_yaml::Error>() {
            ErrorCode::YamlError
        } else if let Some(inner) = source.downcast_ref::<StepTreeError>() {
            Self::extract_code_and_context(inner).0
        } else {
            ErrorCode::InternalError
        }
    }
}
