//! Suspension period models.
//!
//! Manual rows arrive as [`ManualSuspension`]s, which may be incomplete while
//! a practitioner is still filling them in. Only rows that validate become
//! [`SuspensionPeriod`]s and count towards the total.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where a counted suspension comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuspensionSource {
    /// Entered by hand.
    Manual,
    /// The fixed COVID-19 suspension.
    Covid,
    /// The fixed suspension of the Orlando reform (L. 103/2017).
    Orlando,
}

/// A manually entered suspension row.
///
/// # Example
///
/// ```
/// use prescrizione_engine::models::ManualSuspension;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2020, 3, 9).unwrap();
/// let row = ManualSuspension { start: Some(start), end: None };
/// assert!(row.to_period().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManualSuspension {
    /// First suspended day.
    #[serde(default)]
    pub start: Option<NaiveDate>,
    /// Last suspended day.
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl ManualSuspension {
    /// Creates a complete row.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Returns the validated period, or `None` for a missing endpoint or `end < start`.
    pub fn to_period(&self) -> Option<SuspensionPeriod> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => SuspensionPeriod::new(start, end),
            _ => None,
        }
    }
}

/// A validated inclusive date range with `end >= start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuspensionPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl SuspensionPeriod {
    /// Creates a period, or `None` when `end` precedes `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (end >= start).then_some(Self { start, end })
    }

    /// First suspended day.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last suspended day.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of suspended days, both endpoints included.
    pub fn days(&self) -> u32 {
        // end >= start, so the difference is non-negative
        (self.end - self.start).num_days() as u32 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_day_period_counts_one_day() {
        let period = SuspensionPeriod::new(date(2020, 3, 9), date(2020, 3, 9)).unwrap();
        assert_eq!(period.days(), 1);
    }

    #[test]
    fn test_period_counts_both_endpoints() {
        let period = SuspensionPeriod::new(date(2020, 3, 9), date(2020, 5, 11)).unwrap();
        assert_eq!(period.days(), 64);
    }

    #[test]
    fn test_period_across_leap_day() {
        let period = SuspensionPeriod::new(date(2020, 2, 28), date(2020, 3, 1)).unwrap();
        assert_eq!(period.days(), 3);
    }

    #[test]
    fn test_reversed_period_is_rejected() {
        assert!(SuspensionPeriod::new(date(2020, 3, 10), date(2020, 3, 9)).is_none());
    }

    #[test]
    fn test_incomplete_rows_do_not_validate() {
        let only_start = ManualSuspension {
            start: Some(date(2020, 3, 9)),
            end: None,
        };
        let only_end = ManualSuspension {
            start: None,
            end: Some(date(2020, 3, 9)),
        };
        assert!(only_start.to_period().is_none());
        assert!(only_end.to_period().is_none());
        assert!(ManualSuspension::default().to_period().is_none());
    }

    #[test]
    fn test_complete_row_validates() {
        let row = ManualSuspension::between(date(2021, 1, 1), date(2021, 1, 10));
        let period = row.to_period().unwrap();
        assert_eq!(period.start(), date(2021, 1, 1));
        assert_eq!(period.end(), date(2021, 1, 10));
        assert_eq!(period.days(), 10);
    }

    #[test]
    fn test_empty_row_deserializes() {
        let row: ManualSuspension = serde_json::from_str("{}").unwrap();
        assert_eq!(row, ManualSuspension::default());
    }
}
