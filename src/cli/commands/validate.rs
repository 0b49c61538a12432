//! Validate command implementation.

use super::load_report;
use crate::cli::ValidateArgs;
use crate::config::ReportConfig;
use crate::error::{Result, StepTreeError};
use crate::validation::StepSequenceValidator;
use serde::Serialize;
use tracing::{info, warn};

/// One malformed element.
#[derive(Debug, Serialize)]
pub struct ElementProblems {
    pub report: String,
    pub feature: String,
    pub element: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    pub problems: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ValidateOutput {
    elements_checked: usize,
    malformed: Vec<ElementProblems>,
}

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if a report cannot be read or parsed, or
/// `MalformedStepTree` if any element has invalid depth markers.
pub fn execute(args: &ValidateArgs, config: &ReportConfig) -> Result<()> {
    let mut elements_checked = 0;
    let mut malformed = Vec::new();

    for path in &args.reports {
        let report = path.display().to_string();
        for feature in load_report(path)? {
            for element in &feature.elements {
                elements_checked += 1;
                let Err(errors) = StepSequenceValidator::validate_element(element) else {
                    continue;
                };
                warn!(
                    report = %report,
                    element = %element.name,
                    problems = errors.len(),
                    "Malformed step nesting"
                );
                malformed.push(ElementProblems {
                    report: report.clone(),
                    feature: feature.name.clone(),
                    element: element.name.clone(),
                    line: element.line,
                    problems: errors.iter().map(ToString::to_string).collect(),
                });
            }
        }
    }

    info!(elements_checked, malformed = malformed.len(), "Validation done");

    let problems: usize = malformed.iter().map(|m| m.problems.len()).sum();
    let elements = malformed.len();

    if config.json {
        let output = ValidateOutput {
            elements_checked,
            malformed,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if malformed.is_empty() {
        println!("{elements_checked} element(s) checked, all step trees well formed");
    } else {
        for entry in &malformed {
            let line = entry.line.map(|l| format!(":{l}")).unwrap_or_default();
            println!("{}{line}: {} / {}", entry.report, entry.feature, entry.element);
            for problem in &entry.problems {
                println!("  {problem}");
            }
        }
    }

    if elements > 0 {
        return Err(StepTreeError::MalformedStepTree { elements, problems });
    }
    Ok(())
}
