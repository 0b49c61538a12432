//! Status resolution.
//!
//! Collapses many outcomes into one under the severity ranking encoded by
//! [`Status`]'s `Ord`. A caller-supplied [`NotFailingStatuses`] set demotes
//! the listed outcomes to [`Status::Passed`] before ranking; every other
//! outcome keeps its rank.
//!
//! An empty collection resolves to `Passed`. Report summaries count an
//! element with no steps and no hooks as passed, so this is kept even though
//! "no status" would be the stricter reading.

use crate::error::{Result, StepTreeError};
use crate::model::{Reported, Status};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Outcome kinds that must not count as failing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotFailingStatuses(BTreeSet<Status>);

impl NotFailingStatuses {
    /// The empty set: every outcome keeps its rank.
    #[must_use]
    pub const fn none() -> Self {
        Self(BTreeSet::new())
    }

    #[must_use]
    pub fn contains(&self, status: Status) -> bool {
        self.0.contains(&status)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Status> + '_ {
        self.0.iter().copied()
    }

    /// The rank this outcome resolves with: exempted kinds count as passed.
    #[must_use]
    pub fn demote(&self, status: Status) -> Status {
        if self.contains(status) {
            Status::Passed
        } else {
            status
        }
    }

    /// Parse a comma separated list such as `"skipped, pending"`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatus` for any entry that is not a known status.
    pub fn parse_list(value: &str) -> Result<Self> {
        value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Status::from_str)
            .collect::<Result<BTreeSet<_>>>()
            .map(Self)
    }
}

impl FromIterator<Status> for NotFailingStatuses {
    fn from_iter<I: IntoIterator<Item = Status>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromStr for NotFailingStatuses {
    type Err = StepTreeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_list(s)
    }
}

impl fmt::Display for NotFailingStatuses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(Status::as_str).collect();
        write!(f, "{}", names.join(","))
    }
}

/// Resolve a collection of outcomes to the single most severe one.
///
/// Order of appearance does not matter. Empty input resolves to `Passed`.
#[must_use]
pub fn resolve_status<I>(statuses: I, not_failing: &NotFailingStatuses) -> Status
where
    I: IntoIterator<Item = Status>,
{
    statuses
        .into_iter()
        .map(|status| not_failing.demote(status))
        .max()
        .unwrap_or(Status::Passed)
}

/// Counts outcomes by kind while tracking the resolved status.
///
/// Counts record the outcome as it contributed to resolution: an exempted
/// outcome is counted as `Passed`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCounter {
    counts: BTreeMap<Status, usize>,
    size: usize,
    final_status: Status,
}

impl StatusCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the outcomes of `items` with no exemptions.
    #[must_use]
    pub fn from_reported<'a, T, I>(items: I) -> Self
    where
        T: Reported + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        Self::with_not_failing(items, &NotFailingStatuses::none())
    }

    /// Count the outcomes of `items`, demoting exempted kinds to passed.
    #[must_use]
    pub fn with_not_failing<'a, T, I>(items: I, not_failing: &NotFailingStatuses) -> Self
    where
        T: Reported + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut counter = Self::new();
        for item in items {
            counter.increment_for(not_failing.demote(item.status()));
        }
        counter
    }

    pub fn increment_for(&mut self, status: Status) {
        *self.counts.entry(status).or_insert(0) += 1;
        self.size += 1;
        self.final_status = self.final_status.max(status);
    }

    #[must_use]
    pub fn value_for(&self, status: Status) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    /// Total number of outcomes counted.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub const fn final_status(&self) -> Status {
        self.final_status
    }
}
