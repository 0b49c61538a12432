//! Element finalization.
//!
//! [`Element::finalize`] runs once per element. It consumes the element, so
//! the flat step list cannot be finalized twice or observed after it has
//! been turned into a tree.

use crate::model::{Element, Feature, Hook, Status, Tag};
use crate::status::{NotFailingStatuses, StatusCounter, resolve_status};
use crate::tree::{StepNode, build_step_tree};
use crate::util::{format_duration, total_duration};
use crate::validation::StepSequenceValidator;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

/// A scenario or background with its step tree, resolved statuses, and
/// total duration.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FinalizedElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,
    pub keyword: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(rename = "start_timestamp", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,

    /// Root steps; nested steps hang off their parents.
    pub steps: Vec<StepNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub before: Vec<Hook>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub after: Vec<Hook>,

    /// Steps, before hooks and after hooks combined.
    pub status: Status,
    pub steps_status: Status,
    pub before_status: Status,
    pub after_status: Status,
    /// Sum of all step durations, nested steps included, in nanoseconds.
    pub duration: u128,
}

impl FinalizedElement {
    #[must_use]
    pub fn formatted_duration(&self) -> String {
        format_duration(self.duration)
    }

    #[must_use]
    pub fn is_scenario(&self) -> bool {
        self.element_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("scenario"))
    }

    #[must_use]
    pub fn is_background(&self) -> bool {
        self.element_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("background"))
    }
}

impl Element {
    /// Build the step tree and resolve status and duration.
    ///
    /// - `duration`: sum over the flat steps.
    /// - `before_status` / `after_status`: hook outcomes, no exemptions.
    /// - `steps_status`: flat step outcomes with `not_failing` applied.
    /// - `status`: the three above combined, no exemptions.
    ///
    /// Nested steps contribute to status and duration exactly like
    /// top-level ones.
    #[must_use]
    pub fn finalize(self, not_failing: &NotFailingStatuses) -> FinalizedElement {
        if let Err(problems) = StepSequenceValidator::validate(&self.steps) {
            for problem in &problems {
                warn!(element = %self.name, %problem, "Malformed step nesting");
            }
        }

        let duration = total_duration(&self.steps);
        let before_status = StatusCounter::from_reported(&self.before).final_status();
        let after_status = StatusCounter::from_reported(&self.after).final_status();
        let steps_status = StatusCounter::with_not_failing(&self.steps, not_failing).final_status();
        let status = resolve_status(
            [steps_status, before_status, after_status],
            &NotFailingStatuses::none(),
        );

        let step_count = self.steps.len();
        let steps = build_step_tree(self.steps);

        debug!(
            element = %self.name,
            steps = step_count,
            roots = steps.len(),
            %status,
            duration,
            "Finalized element"
        );

        FinalizedElement {
            id: self.id,
            name: self.name,
            element_type: self.element_type,
            keyword: self.keyword,
            description: self.description,
            line: self.line,
            start_time: self.start_time,
            tags: self.tags,
            steps,
            before: self.before,
            after: self.after,
            status,
            steps_status,
            before_status,
            after_status,
            duration,
        }
    }
}

/// A feature whose elements have each been finalized.
///
/// Nothing is aggregated across elements.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FinalizedFeature {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub keyword: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    pub elements: Vec<FinalizedElement>,
}

impl Feature {
    /// Finalize every element independently.
    #[must_use]
    pub fn finalize(self, not_failing: &NotFailingStatuses) -> FinalizedFeature {
        let elements = self
            .elements
            .into_iter()
            .map(|element| element.finalize(not_failing))
            .collect();

        FinalizedFeature {
            uri: self.uri,
            id: self.id,
            name: self.name,
            keyword: self.keyword,
            description: self.description,
            line: self.line,
            tags: self.tags,
            elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Step, TestResult};
    use crate::tree::{statuses, walk};

    fn step(depth: usize, status: Status, duration: u64) -> Step {
        Step::new(
            format!("{}When ", ">".repeat(depth)),
            "something happens",
            TestResult::new(status, duration),
        )
    }

    fn hook(status: Status) -> Hook {
        Hook::new(TestResult::new(status, 1_000))
    }

    #[test]
    fn empty_element_is_passed() {
        let finalized = Element::default().finalize(&NotFailingStatuses::none());
        assert_eq!(finalized.status, Status::Passed);
        assert_eq!(finalized.steps_status, Status::Passed);
        assert_eq!(finalized.before_status, Status::Passed);
        assert_eq!(finalized.after_status, Status::Passed);
        assert_eq!(finalized.duration, 0);
        assert!(finalized.steps.is_empty());
    }

    #[test]
    fn ten_passed_steps() {
        let durations: [u64; 10] = [
            9_926_312_288,
            9_926_312_288,
            9_926_312_288,
            9_926_312_288,
            9_926_312_288,
            9_926_312_288,
            9_926_312_288,
            9_926_312_288,
            9_926_312_288,
            9_926_312_297,
        ];
        let element = Element {
            name: "1st scenario".to_string(),
            element_type: Some("scenario".to_string()),
            steps: durations.iter().map(|d| step(0, Status::Passed, *d)).collect(),
            before: vec![hook(Status::Passed)],
            after: vec![hook(Status::Passed)],
            ..Element::default()
        };

        let finalized = element.finalize(&NotFailingStatuses::none());
        assert_eq!(finalized.status, Status::Passed);
        assert_eq!(finalized.duration, 99_263_122_889);
        assert_eq!(finalized.formatted_duration(), "1:39.263");
        assert_eq!(finalized.steps.len(), 10);
        assert!(finalized.is_scenario());
    }

    #[test]
    fn mixed_outcomes_fail() {
        let mut statuses = vec![Status::Passed; 5];
        statuses.push(Status::Failed);
        statuses.extend([Status::Skipped; 2]);
        statuses.push(Status::Pending);
        statuses.extend([Status::Undefined; 3]);
        let element = Element {
            steps: statuses.into_iter().map(|s| step(0, s, 1)).collect(),
            ..Element::default()
        };

        let finalized = element.finalize(&NotFailingStatuses::none());
        assert_eq!(finalized.steps_status, Status::Failed);
        assert_eq!(finalized.status, Status::Failed);
        assert_eq!(finalized.duration, 12);
    }

    #[test]
    fn exemptions_apply_to_steps_only() {
        let not_failing = NotFailingStatuses::parse_list("skipped").unwrap();
        let element = Element {
            steps: vec![step(0, Status::Passed, 1), step(0, Status::Skipped, 1)],
            after: vec![hook(Status::Skipped)],
            ..Element::default()
        };

        let finalized = element.finalize(&not_failing);
        assert_eq!(finalized.steps_status, Status::Passed);
        assert_eq!(finalized.after_status, Status::Skipped);
        assert_eq!(finalized.status, Status::Skipped);
    }

    #[test]
    fn failing_before_hook_fails_element() {
        let element = Element {
            steps: vec![step(0, Status::Skipped, 0)],
            before: vec![hook(Status::Passed), hook(Status::Failed)],
            ..Element::default()
        };
        let finalized = element.finalize(&NotFailingStatuses::none());
        assert_eq!(finalized.before_status, Status::Failed);
        assert_eq!(finalized.steps_status, Status::Skipped);
        assert_eq!(finalized.status, Status::Failed);
    }

    #[test]
    fn huge_durations_do_not_overflow() {
        let element = Element {
            steps: vec![
                step(0, Status::Passed, u64::MAX),
                step(1, Status::Passed, 1),
            ],
            ..Element::default()
        };
        let finalized = element.finalize(&NotFailingStatuses::none());
        assert_eq!(finalized.duration, u128::from(u64::MAX) + 1);
        assert_eq!(finalized.status, Status::Passed);
    }

    #[test]
    fn nested_steps_count_toward_status_and_duration() {
        let element = Element {
            steps: vec![
                step(0, Status::Passed, 10),
                step(1, Status::Passed, 20),
                step(2, Status::Undefined, 30),
                step(0, Status::Passed, 40),
            ],
            ..Element::default()
        };
        let finalized = element.finalize(&NotFailingStatuses::none());
        assert_eq!(finalized.steps.len(), 2);
        assert_eq!(finalized.steps[0].descendant_count(), 2);
        assert_eq!(finalized.steps_status, Status::Undefined);
        assert_eq!(finalized.duration, 100);
        assert_eq!(walk(&finalized.steps).count(), 4);
        assert_eq!(
            resolve_status(statuses(&finalized.steps), &NotFailingStatuses::none()),
            finalized.steps_status
        );
    }

    #[test]
    fn hook_durations_are_not_counted() {
        let element = Element {
            steps: vec![step(0, Status::Passed, 5)],
            before: vec![hook(Status::Passed)],
            ..Element::default()
        };
        assert_eq!(element.finalize(&NotFailingStatuses::none()).duration, 5);
    }

    #[test]
    fn feature_finalizes_each_element() {
        let feature = Feature {
            name: "Billing".to_string(),
            elements: vec![
                Element {
                    steps: vec![step(0, Status::Failed, 1)],
                    ..Element::default()
                },
                Element {
                    steps: vec![step(0, Status::Passed, 1)],
                    ..Element::default()
                },
            ],
            ..Feature::default()
        };
        let finalized = feature.finalize(&NotFailingStatuses::none());
        assert_eq!(finalized.name, "Billing");
        assert_eq!(finalized.elements[0].status, Status::Failed);
        assert_eq!(finalized.elements[1].status, Status::Passed);
    }
}
