//! Validation helpers for `steptree`.
//!
//! Tree building never fails: it accepts any depth sequence. These routines
//! report sequences a depth-first producer could not have emitted, without
//! changing how they are built.

use crate::error::ValidationError;
use crate::model::{Element, Step};
use crate::tree::step_depth;

/// Validates the depth markers of a flat step sequence.
pub struct StepSequenceValidator;

impl StepSequenceValidator {
    /// Validate a flat step sequence and return all problems found.
    ///
    /// Rules:
    /// - The first step is at depth 0.
    /// - No step is more than one level deeper than the step before it.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any rule is violated. Each error's
    /// field is `steps[i]`, the index of the offending step.
    pub fn validate(steps: &[Step]) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut previous: Option<usize> = None;

        for (index, step) in steps.iter().enumerate() {
            let depth = step_depth(&step.keyword);
            match previous {
                None if depth > 0 => {
                    errors.push(ValidationError::new(
                        format!("steps[{index}]"),
                        format!("first step must be at depth 0, found depth {depth}"),
                    ));
                }
                Some(prev) if depth > prev + 1 => {
                    errors.push(ValidationError::new(
                        format!("steps[{index}]"),
                        format!("depth jumps from {prev} to {depth}"),
                    ));
                }
                _ => {}
            }
            previous = Some(depth);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate the steps of an element.
    ///
    /// # Errors
    ///
    /// Same as [`Self::validate`].
    pub fn validate_element(element: &Element) -> Result<(), Vec<ValidationError>> {
        Self::validate(&element.steps)
    }
}
