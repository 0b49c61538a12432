//! `steptree` rebuilds nested step trees from Cucumber JSON reports.
//!
//! Reports flatten nested steps into one list and record the nesting with
//! leading `>` characters on each step keyword. This crate turns that list
//! back into a tree and resolves each scenario's status and duration:
//!
//! - [`tree`]: depth extraction and tree building
//! - [`status`]: severity ranking and not-failing exemptions
//! - [`aggregate`]: per-element finalization
//! - [`util::duration`]: duration sums and formatting

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod model;
pub mod status;
pub mod tree;
pub mod util;
pub mod validation;

pub use aggregate::{FinalizedElement, FinalizedFeature};
pub use error::{ErrorCode, Result, StepTreeError, StructuredError};
pub use model::{Element, Feature, Hook, Reported, Status, Step, TestResult};
pub use status::{NotFailingStatuses, StatusCounter, resolve_status};
pub use tree::{StepNode, build_step_tree, flatten, step_depth};
