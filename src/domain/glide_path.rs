//! Allocation trend across ages, the data behind the allocation chart.

use super::allocation::{allocate, bracket_for_age, AgeAllocation};

pub const MIN_CHART_AGE: u32 = 20;
pub const MAX_CHART_AGE: u32 = 80;
const YEARS_BEFORE: u32 = 5;
const YEARS_AFTER: u32 = 40;

#[derive(Debug, Clone, PartialEq)]
pub struct GlidePoint {
    pub age: u32,
    pub allocation: AgeAllocation,
    pub stock_percentage: u32,
    pub bond_percentage: u32,
    pub weighted_expense_ratio: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlidePath {
    pub current_age: u32,
    pub points: Vec<GlidePoint>,
}

impl GlidePath {
    pub fn contains_current_age(&self) -> bool {
        self.points.iter().any(|p| p.age == self.current_age)
    }

    pub fn ages(&self) -> impl Iterator<Item = u32> + '_ {
        self.points.iter().map(|p| p.age)
    }
}

/// Ages `max(20, age - 5)` up to, not including, `min(80, age + 40)`.
pub fn glide_path(current_age: u32) -> GlidePath {
    let first = current_age.saturating_sub(YEARS_BEFORE).max(MIN_CHART_AGE);
    let last = current_age.saturating_add(YEARS_AFTER).min(MAX_CHART_AGE);

    let points = (first..last)
        .map(|age| {
            // Expense ratio is independent of the contribution size.
            let portfolio = allocate(age, 1000.0);
            GlidePoint {
                age,
                allocation: bracket_for_age(age),
                stock_percentage: portfolio.stock_percentage,
                bond_percentage: portfolio.bond_percentage,
                weighted_expense_ratio: portfolio.weighted_expense_ratio,
            }
        })
        .collect();

    GlidePath {
        current_age,
        points,
    }
}
