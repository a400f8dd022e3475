//! Annual contribution limits and month-by-month scheduling.
//!
//! A schedule advances one calendar month at a time from the start date and
//! stops at whichever comes first: the annual cap being reached, or the end
//! of the start date's calendar (tax) year.

use chrono::{Datelike, Months, NaiveDate};

/// Age at which the catch-up limit applies.
pub const CATCH_UP_AGE: u32 = 50;

/// Roth IRA contribution limits for one tax year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContributionLimits {
    pub standard: f64,
    pub catch_up: f64,
    pub catch_up_age: u32,
}

/// 2025 limits.
pub const LIMITS_2025: ContributionLimits = ContributionLimits {
    standard: 7000.0,
    catch_up: 8000.0,
    catch_up_age: CATCH_UP_AGE,
};

impl Default for ContributionLimits {
    fn default() -> Self {
        LIMITS_2025
    }
}

impl ContributionLimits {
    pub fn for_age(&self, age: u32) -> f64 {
        if age >= self.catch_up_age {
            self.catch_up
        } else {
            self.standard
        }
    }
}

/// Annual cap for `age` under the default limits.
pub fn contribution_limit(age: u32) -> f64 {
    LIMITS_2025.for_age(age)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    /// Contribution date, one calendar month after the previous entry.
    pub month: NaiveDate,
    pub amount: f64,
    pub cumulative: f64,
}

impl ScheduleEntry {
    /// Month label, e.g. "January 2025".
    pub fn label(&self) -> String {
        self.month.format("%B %Y").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContributionSchedule {
    pub entries: Vec<ScheduleEntry>,
    pub total_contributed: f64,
}

impl ContributionSchedule {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn shortfall(&self, annual_cap: f64) -> f64 {
        (annual_cap - self.total_contributed).max(0.0)
    }
}

/// Months from `start_date`'s month through December, inclusive. Always in [1, 12].
pub fn compute_months_remaining(start_date: NaiveDate) -> u32 {
    12 - start_date.month0()
}

/// Monthly amount that exactly reaches the cap over the remaining months.
pub fn max_monthly_to_hit_limit(annual_cap: f64, months_remaining: u32) -> f64 {
    if months_remaining == 0 {
        annual_cap
    } else {
        annual_cap / months_remaining as f64
    }
}

pub fn build_schedule(
    start_date: NaiveDate,
    monthly_amount: f64,
    annual_cap: f64,
) -> ContributionSchedule {
    let mut schedule = ContributionSchedule::default();
    let tax_year = start_date.year();
    let mut current = start_date;

    while current.year() == tax_year && schedule.total_contributed < annual_cap {
        let remaining = annual_cap - schedule.total_contributed;
        let contribution = monthly_amount.min(remaining);

        // Zero or negative requests never produce an entry.
        if contribution > 0.0 {
            schedule.total_contributed += contribution;
            schedule.entries.push(ScheduleEntry {
                month: current,
                amount: contribution,
                cumulative: schedule.total_contributed,
            });
        } else {
            break;
        }

        current = match current.checked_add_months(Months::new(1)) {
            Some(next) => next,
            None => break,
        };
    }

    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn limit_by_age() {
        assert_eq!(contribution_limit(25), 7000.0);
        assert_eq!(contribution_limit(49), 7000.0);
        assert_eq!(contribution_limit(50), 8000.0);
        assert_eq!(contribution_limit(72), 8000.0);
    }

    #[test]
    fn custom_limits() {
        let limits = ContributionLimits {
            standard: 6500.0,
            catch_up: 7500.0,
            catch_up_age: 50,
        };
        assert_eq!(limits.for_age(30), 6500.0);
        assert_eq!(limits.for_age(50), 7500.0);
    }

    #[test]
    fn months_remaining_bounds() {
        assert_eq!(compute_months_remaining(ymd(2025, 1, 1)), 12);
        assert_eq!(compute_months_remaining(ymd(2025, 6, 15)), 7);
        assert_eq!(compute_months_remaining(ymd(2025, 12, 31)), 1);
    }

    #[test]
    fn months_remaining_ignores_clock() {
        assert_eq!(compute_months_remaining(ymd(1999, 11, 1)), 2);
    }

    #[test]
    fn max_monthly() {
        assert_relative_eq!(max_monthly_to_hit_limit(7000.0, 7), 1000.0);
        assert_relative_eq!(max_monthly_to_hit_limit(7000.0, 0), 7000.0);
    }

    #[test]
    fn schedule_reaches_cap_in_july() {
        let schedule = build_schedule(ymd(2025, 1, 1), 1000.0, 7000.0);
        assert_eq!(schedule.entries.len(), 7);
        let cumulative: Vec<f64> = schedule.entries.iter().map(|e| e.cumulative).collect();
        assert_eq!(
            cumulative,
            vec![1000.0, 2000.0, 3000.0, 4000.0, 5000.0, 6000.0, 7000.0]
        );
        assert_eq!(schedule.entries[0].label(), "January 2025");
        assert_eq!(schedule.entries[6].label(), "July 2025");
        assert_relative_eq!(schedule.total_contributed, 7000.0);
    }

    #[test]
    fn schedule_truncated_at_year_end() {
        let schedule = build_schedule(ymd(2025, 11, 1), 1000.0, 7000.0);
        assert_eq!(schedule.entries.len(), 2);
        assert_eq!(schedule.entries[0].label(), "November 2025");
        assert_eq!(schedule.entries[1].label(), "December 2025");
        assert_relative_eq!(schedule.total_contributed, 2000.0);
        assert_relative_eq!(schedule.shortfall(7000.0), 5000.0);
    }

    #[test]
    fn schedule_clips_last_month() {
        let schedule = build_schedule(ymd(2025, 1, 1), 3000.0, 7000.0);
        let amounts: Vec<f64> = schedule.entries.iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![3000.0, 3000.0, 1000.0]);
    }

    #[test]
    fn schedule_single_entry_when_monthly_exceeds_cap() {
        let schedule = build_schedule(ymd(2025, 3, 1), 10_000.0, 8000.0);
        assert_eq!(schedule.entries.len(), 1);
        assert_relative_eq!(schedule.entries[0].amount, 8000.0);
        assert_relative_eq!(schedule.shortfall(8000.0), 0.0);
    }

    #[test]
    fn schedule_empty_for_zero_or_negative() {
        assert!(build_schedule(ymd(2025, 1, 1), 0.0, 7000.0).is_empty());
        assert!(build_schedule(ymd(2025, 1, 1), -50.0, 7000.0).is_empty());
    }

    #[test]
    fn schedule_keeps_day_of_month() {
        let schedule = build_schedule(ymd(2025, 10, 15), 100.0, 7000.0);
        assert_eq!(schedule.entries.len(), 3);
        assert_eq!(schedule.entries[2].month, ymd(2025, 12, 15));
    }

    proptest! {
        #[test]
        fn schedule_stays_within_cap_and_year(
            year in 2000i32..2100,
            month in 1u32..=12,
            day in 1u32..=28,
            monthly in -500.0f64..10_000.0,
            cap in 0.0f64..20_000.0,
        ) {
            let start = ymd(year, month, day);
            let schedule = build_schedule(start, monthly, cap);

            prop_assert!(schedule.entries.len() as u32 <= compute_months_remaining(start));
            prop_assert!(schedule.total_contributed <= cap + 1e-9);

            let mut previous = 0.0;
            for entry in &schedule.entries {
                prop_assert!(entry.amount > 0.0);
                prop_assert!(entry.cumulative >= previous);
                prop_assert!(entry.cumulative <= cap + 1e-9);
                prop_assert_eq!(entry.month.year(), year);
                previous = entry.cumulative;
            }
            prop_assert_eq!(previous, schedule.total_contributed);
        }
    }
}
