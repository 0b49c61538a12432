//! Step tree reconstruction.
//!
//! Reports list nested steps flat, in depth-first order, and mark each
//! step's nesting level with a leading run of [`STEP_DEPTH_MARKER`] in its
//! keyword:
//!
//! ```text
//! Given a logged in user          depth 0
//! > When they open settings       depth 1
//! >> Then the menu loads          depth 2
//! > And they change the language  depth 1
//! Then the page is translated     depth 0
//! ```
//!
//! [`build_step_tree`] turns that sequence into an owned forest of
//! [`StepNode`]s. It runs as a stack machine, so building never recurses
//! however deep the nesting goes.

use crate::model::{Reported, Status, Step, TestResult};
use serde::Serialize;

/// Marker character whose leading run encodes step depth.
///
/// Upstream producers emit this convention; it must not change.
pub const STEP_DEPTH_MARKER: char = '>';

/// Depth of a step, from the leading run of `>` in its keyword.
///
/// Blank keywords and keywords without the marker are depth 0.
#[must_use]
pub fn step_depth(keyword: &str) -> usize {
    if keyword.trim().is_empty() {
        return 0;
    }
    keyword
        .chars()
        .take_while(|c| *c == STEP_DEPTH_MARKER)
        .count()
}

/// Keyword with the depth marker and surrounding whitespace removed.
#[must_use]
pub fn strip_depth_marker(keyword: &str) -> &str {
    keyword.trim_start_matches(STEP_DEPTH_MARKER).trim()
}

/// A step together with the steps nested directly under it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StepNode {
    pub step: Step,
    pub depth: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Self>,
}

impl StepNode {
    #[must_use]
    pub fn new(step: Step) -> Self {
        let depth = step_depth(&step.keyword);
        Self {
            step,
            depth,
            children: Vec::new(),
        }
    }

    /// Keyword without the depth marker, e.g. `When`.
    #[must_use]
    pub fn display_keyword(&self) -> &str {
        strip_depth_marker(&self.step.keyword)
    }

    /// Number of nodes below this one, at any depth.
    #[must_use]
    pub fn descendant_count(&self) -> usize {
        self.iter().count() - 1
    }

    /// Depth-first pre-order walk, starting with this node.
    #[must_use]
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }
}

impl Reported for StepNode {
    fn result(&self) -> &TestResult {
        &self.step.result
    }
}

/// Pre-order iterator over a step subtree.
pub struct PreOrder<'a> {
    stack: Vec<&'a StepNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a StepNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Pre-order walk over a whole forest.
pub fn walk(roots: &[StepNode]) -> impl Iterator<Item = &StepNode> {
    roots.iter().flat_map(StepNode::iter)
}

/// Flatten a forest back into its steps, in pre-order.
///
/// For any input, `flatten(build_step_tree(steps)) == steps`.
#[must_use]
pub fn flatten(roots: Vec<StepNode>) -> Vec<Step> {
    let mut out = Vec::new();
    let mut stack: Vec<StepNode> = roots.into_iter().rev().collect();
    while let Some(node) = stack.pop() {
        stack.extend(node.children.into_iter().rev());
        out.push(node.step);
    }
    out
}

/// Every outcome in a forest, ignoring its shape.
pub fn statuses(roots: &[StepNode]) -> impl Iterator<Item = Status> + '_ {
    walk(roots).map(Reported::status)
}

/// Build the step forest for one element from its flat step sequence.
///
/// A step at depth `d` becomes a child of the nearest preceding step at
/// depth `d - 1`; depth-0 steps become roots. A scope closes as soon as a
/// step at the same or a shallower depth arrives. Relative order is kept at
/// every level.
///
/// Input from a depth-first producer never jumps more than one level at a
/// time. If it does, the step attaches to the nearest open shallower step,
/// and a step with no open scope at all becomes a root. Use
/// [`crate::validation::StepSequenceValidator`] to detect such input.
#[must_use]
pub fn build_step_tree(steps: Vec<Step>) -> Vec<StepNode> {
    let mut roots = Vec::new();
    let mut open: Vec<StepNode> = Vec::new();

    for step in steps {
        let node = StepNode::new(step);
        close_scopes(&mut open, &mut roots, node.depth);
        open.push(node);
    }
    close_scopes(&mut open, &mut roots, 0);

    roots
}

/// Close every open scope at `depth` or deeper, attaching each closed node
/// to its parent (or to the roots when nothing is left open).
fn close_scopes(open: &mut Vec<StepNode>, roots: &mut Vec<StepNode>, depth: usize) {
    while open.last().is_some_and(|top| top.depth >= depth) {
        let Some(node) = open.pop() else {
            break;
        };
        match open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}
