//! Duration accumulation and formatting.
//!
//! Report durations are `u64` nanoseconds. Absent durations count as zero.
//! Sums are `u128`, so any number of maximal durations adds up exactly.

use crate::model::Reported;

const NANOS_PER_MILLI: u128 = 1_000_000;

/// Sum the durations of a flat collection of steps or hooks.
///
/// Only the multiset of durations matters; order does not.
#[must_use]
pub fn total_duration<'a, T, I>(items: I) -> u128
where
    T: Reported + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .map(|item| u128::from(item.duration()))
        .sum()
}

/// Format nanoseconds with millisecond precision.
///
/// Larger units appear only when non-zero, and the unit that follows one is
/// zero-padded:
/// - `92_610_000` -> `0.092`
/// - `99_263_122_889` -> `1:39.263`
/// - `3_723_004_000_000` -> `1:02:03.004`
/// - `90_061_000_000_000` -> `1d 1:01:01.000`
#[must_use]
pub fn format_duration(nanos: u128) -> String {
    let total_millis = nanos / NANOS_PER_MILLI;
    let millis = total_millis % 1000;
    let total_secs = total_millis / 1000;
    let secs = total_secs % 60;
    let total_mins = total_secs / 60;
    let mins = total_mins % 60;
    let total_hours = total_mins / 60;
    let hours = total_hours % 24;
    let days = total_hours / 24;

    let mut out = String::new();
    if days > 0 {
        out.push_str(&format!("{days}d "));
    }
    let has_hours = days > 0 || hours > 0;
    if has_hours {
        out.push_str(&format!("{hours}:{mins:02}:"));
    } else if mins > 0 {
        out.push_str(&format!("{mins}:"));
    }
    if has_hours || mins > 0 {
        out.push_str(&format!("{secs:02}"));
    } else {
        out.push_str(&format!("{secs}"));
    }
    out.push_str(&format!(".{millis:03}"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Hook, Status, Step, TestResult};

    #[test]
    fn test_total_duration_steps() {
        let steps = vec![
            Step::new("Given ", "a", TestResult::new(Status::Passed, 10)),
            Step::new("> When ", "b", TestResult::new(Status::Failed, 32)),
        ];
        assert_eq!(total_duration(&steps), 42);
    }

    #[test]
    fn test_total_duration_absent_is_zero() {
        let mut hook = Hook::new(TestResult::new(Status::Passed, 0));
        hook.result.duration = None;
        let hooks = vec![hook, Hook::new(TestResult::new(Status::Passed, 7))];
        assert_eq!(total_duration(&hooks), 7);
    }

    #[test]
    fn test_total_duration_past_u64() {
        let steps = vec![
            Step::new("Given ", "a", TestResult::new(Status::Passed, u64::MAX)),
            Step::new("> When ", "b", TestResult::new(Status::Passed, 1)),
            Step::new("Then ", "c", TestResult::new(Status::Passed, u64::MAX)),
        ];
        let expected = u128::from(u64::MAX) * 2 + 1;
        assert_eq!(total_duration(&steps), expected);
        assert_eq!(format_duration(expected), "427007d 23:09:07.419");
    }

    #[test]
    fn test_total_duration_empty() {
        let steps: Vec<Step> = Vec::new();
        assert_eq!(total_duration(&steps), 0);
    }

    #[test]
    fn test_format_duration_sub_second() {
        assert_eq!(format_duration(92_610_000), "0.092");
        assert_eq!(format_duration(304_539_714), "0.304");
        assert_eq!(format_duration(0), "0.000");
    }

    #[test]
    fn test_format_duration_minutes() {
        assert_eq!(format_duration(99_263_122_889), "1:39.263");
        assert_eq!(format_duration(60_000_000_000), "1:00.000");
    }

    #[test]
    fn test_format_duration_hours_and_days() {
        assert_eq!(format_duration(3_723_004_000_000), "1:02:03.004");
        assert_eq!(format_duration(90_061_000_000_000), "1d 1:01:01.000");
    }
}
