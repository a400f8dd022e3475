//! Contribution plan assembly: limits, schedule, allocation and advice in one value.

use chrono::{Datelike, NaiveDate};

use super::advice::{self, Purchase, Suggestion, SuggestionInputs};
use super::allocation::{self, PortfolioAllocation};
use super::contribution::{self, ContributionLimits, ContributionSchedule};
use super::error::RothkitError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerInput {
    pub age: u32,
    pub start_date: NaiveDate,
    pub monthly_contribution: f64,
}

impl PlannerInput {
    /// Build from the raw month/year the user entered; the plan starts on the 1st.
    pub fn new(
        age: u32,
        start_month: u32,
        start_year: i32,
        monthly_contribution: f64,
    ) -> Result<Self, RothkitError> {
        if !(1..=12).contains(&start_month) {
            return Err(RothkitError::invalid_input(
                "start month",
                format!("{start_month} is not between 1 and 12"),
            ));
        }
        let start_date = NaiveDate::from_ymd_opt(start_year, start_month, 1).ok_or_else(|| {
            RothkitError::invalid_input("start year", format!("{start_year} is out of range"))
        })?;
        if !monthly_contribution.is_finite() {
            return Err(RothkitError::invalid_input(
                "monthly contribution",
                "must be a finite number",
            ));
        }
        Ok(Self {
            age,
            start_date,
            monthly_contribution,
        })
    }

    pub fn tax_year(&self) -> i32 {
        self.start_date.year()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub input: PlannerInput,
    pub annual_limit: f64,
    pub months_remaining: u32,
    pub max_monthly: f64,
    pub schedule: ContributionSchedule,
    pub allocation: PortfolioAllocation,
    pub suggestions: Vec<Suggestion>,
}

impl Plan {
    pub fn build(input: PlannerInput, limits: &ContributionLimits) -> Self {
        let annual_limit = limits.for_age(input.age);
        let months_remaining = contribution::compute_months_remaining(input.start_date);
        let max_monthly = contribution::max_monthly_to_hit_limit(annual_limit, months_remaining);
        let schedule =
            contribution::build_schedule(input.start_date, input.monthly_contribution, annual_limit);
        let allocation = allocation::allocate(input.age, input.monthly_contribution);

        let suggestions = advice::optimization_suggestions(&SuggestionInputs {
            tax_year: input.tax_year(),
            monthly_contribution: input.monthly_contribution,
            max_monthly,
            annual_limit,
            total_contributed: schedule.total_contributed,
            allocation: &allocation,
        });

        Plan {
            input,
            annual_limit,
            months_remaining,
            max_monthly,
            schedule,
            allocation,
            suggestions,
        }
    }

    pub fn shortfall(&self) -> f64 {
        self.schedule.shortfall(self.annual_limit)
    }

    pub fn purchase_plan(&self) -> Vec<Purchase> {
        advice::purchase_plan(&self.allocation)
    }
}
