//! Text formatting functions for `steptree`.
//!
//! Renders finalized elements as indented trees:
//!
//! ```text
//! ✗ Scenario: Withdraw cash [failed] 0.084
//!   before: passed
//!   ✓ Given the account balance is 100 0.010
//!     ✓ When the card is inserted 0.004
//!   ✗ Then the ATM dispenses 20 0.070
//!       expected 20 but was 0
//! ```

use crate::aggregate::{FinalizedElement, FinalizedFeature};
use crate::model::{Reported, Status};
use crate::tree::StepNode;
use crate::util::format_duration;
use crossterm::style::Stylize;

/// Status icon characters.
pub mod icons {
    pub const PASSED: &str = "✓";
    pub const FAILED: &str = "✗";
    pub const SKIPPED: &str = "↷";
    pub const PENDING: &str = "…";
    pub const UNDEFINED: &str = "?";
    pub const AMBIGUOUS: &str = "‼";
}

const INDENT: &str = "  ";

/// Formatting options for text output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatOptions {
    pub use_color: bool,
    /// Print error messages under failing steps.
    pub show_errors: bool,
}

impl TextFormatOptions {
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            use_color: false,
            show_errors: true,
        }
    }
}

/// Return the icon character for a status.
#[must_use]
pub const fn format_status_icon(status: Status) -> &'static str {
    match status {
        Status::Passed => icons::PASSED,
        Status::Failed => icons::FAILED,
        Status::Skipped => icons::SKIPPED,
        Status::Pending => icons::PENDING,
        Status::Undefined => icons::UNDEFINED,
        Status::Ambiguous => icons::AMBIGUOUS,
    }
}

/// Format status label with optional color.
#[must_use]
pub fn format_status_label(status: Status, use_color: bool) -> String {
    let label = status.as_str();
    if !use_color {
        return label.to_string();
    }

    match status {
        Status::Passed => label.green().to_string(),
        Status::Failed => label.red().to_string(),
        Status::Skipped => label.cyan().to_string(),
        Status::Pending => label.yellow().to_string(),
        Status::Undefined => label.magenta().to_string(),
        Status::Ambiguous => label.dark_red().to_string(),
    }
}

fn format_icon(status: Status, use_color: bool) -> String {
    let icon = format_status_icon(status);
    if !use_color {
        return icon.to_string();
    }
    match status {
        Status::Passed => icon.green().to_string(),
        Status::Failed | Status::Ambiguous => icon.red().to_string(),
        _ => icon.yellow().to_string(),
    }
}

/// Format one element: a header line, hook summaries, then the step tree.
#[must_use]
pub fn format_element(element: &FinalizedElement, options: TextFormatOptions) -> String {
    let mut out = String::new();

    let keyword = if element.keyword.is_empty() {
        "Scenario"
    } else {
        element.keyword.trim()
    };
    out.push_str(&format!(
        "{} {}: {} [{}] {}\n",
        format_icon(element.status, options.use_color),
        keyword,
        element.name,
        format_status_label(element.status, options.use_color),
        element.formatted_duration(),
    ));

    if !element.before.is_empty() {
        out.push_str(&format!(
            "{INDENT}before: {}\n",
            format_status_label(element.before_status, options.use_color)
        ));
    }

    let mut stack: Vec<(&StepNode, usize)> = element.steps.iter().rev().map(|n| (n, 1)).collect();
    while let Some((node, level)) = stack.pop() {
        format_step_line(&mut out, node, level, options);
        stack.extend(node.children.iter().rev().map(|child| (child, level + 1)));
    }

    if !element.after.is_empty() {
        out.push_str(&format!(
            "{INDENT}after: {}\n",
            format_status_label(element.after_status, options.use_color)
        ));
    }

    out
}

fn format_step_line(out: &mut String, node: &StepNode, level: usize, options: TextFormatOptions) {
    let indent = INDENT.repeat(level);
    out.push_str(&format!(
        "{indent}{} {} {} {}\n",
        format_icon(node.status(), options.use_color),
        node.display_keyword(),
        node.step.name,
        format_duration(u128::from(node.duration())),
    ));

    if options.show_errors {
        if let Some(message) = node.step.result.error_message.as_deref() {
            for line in message.lines().filter(|l| !l.trim().is_empty()) {
                out.push_str(&format!("{indent}{INDENT}{INDENT}{}\n", line.trim_end()));
            }
        }
    }
}

/// Format a feature heading followed by each of its elements.
#[must_use]
pub fn format_feature(feature: &FinalizedFeature, options: TextFormatOptions) -> String {
    let keyword = if feature.keyword.is_empty() {
        "Feature"
    } else {
        feature.keyword.trim()
    };
    let mut out = format!("{keyword}: {}\n", feature.name);
    for element in &feature.elements {
        for line in format_element(element, options).lines() {
            out.push_str(INDENT);
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}
