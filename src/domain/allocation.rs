//! Age-based target allocation and per-fund contribution split.

use std::fmt;

use super::fund_catalog::{self, Fund};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetBucket {
    LargeCap,
    TotalMarket,
    SmallCap,
    International,
    Reits,
    Commodities,
    Bonds,
}

impl AssetBucket {
    pub const ALL: [AssetBucket; 7] = [
        AssetBucket::LargeCap,
        AssetBucket::TotalMarket,
        AssetBucket::SmallCap,
        AssetBucket::International,
        AssetBucket::Reits,
        AssetBucket::Commodities,
        AssetBucket::Bonds,
    ];

    /// The fund that implements this bucket.
    pub fn fund(self) -> &'static Fund {
        match self {
            AssetBucket::LargeCap => &fund_catalog::FXAIX,
            AssetBucket::TotalMarket => &fund_catalog::FZROX,
            AssetBucket::SmallCap => &fund_catalog::FSMDX,
            AssetBucket::International => &fund_catalog::FTIHX,
            AssetBucket::Reits => &fund_catalog::FREL,
            AssetBucket::Commodities => &fund_catalog::IAU,
            AssetBucket::Bonds => &fund_catalog::FXNAX,
        }
    }

    pub fn is_bond(self) -> bool {
        self == AssetBucket::Bonds
    }
}

impl fmt::Display for AssetBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetBucket::LargeCap => "US Large Cap",
            AssetBucket::TotalMarket => "US Total Market",
            AssetBucket::SmallCap => "US Small Cap",
            AssetBucket::International => "International",
            AssetBucket::Reits => "REITs",
            AssetBucket::Commodities => "Gold/Commodities",
            AssetBucket::Bonds => "Bonds",
        };
        write!(f, "{} ({})", name, self.fund().ticker)
    }
}

/// Target percentages per bucket, in [`AssetBucket::ALL`] order. Sums to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeAllocation {
    pub percentages: [u32; 7],
}

impl AgeAllocation {
    pub fn percentage(&self, bucket: AssetBucket) -> u32 {
        self.percentages[bucket as usize]
    }

    pub fn total(&self) -> u32 {
        self.percentages.iter().sum()
    }

    pub fn bonds(&self) -> u32 {
        self.percentage(AssetBucket::Bonds)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AssetBucket, u32)> + '_ {
        AssetBucket::ALL
            .iter()
            .map(move |&bucket| (bucket, self.percentage(bucket)))
    }
}

const AGE_30_AND_UNDER: AgeAllocation = AgeAllocation {
    percentages: [35, 25, 15, 15, 5, 5, 0],
};
const AGE_31_TO_40: AgeAllocation = AgeAllocation {
    percentages: [30, 20, 12, 18, 5, 5, 10],
};
const AGE_41_TO_50: AgeAllocation = AgeAllocation {
    percentages: [25, 20, 10, 15, 5, 5, 20],
};
const AGE_OVER_50: AgeAllocation = AgeAllocation {
    percentages: [20, 15, 8, 12, 5, 5, 35],
};

pub fn bracket_for_age(age: u32) -> AgeAllocation {
    match age {
        0..=30 => AGE_30_AND_UNDER,
        31..=40 => AGE_31_TO_40,
        41..=50 => AGE_41_TO_50,
        _ => AGE_OVER_50,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FundAllocation {
    pub bucket: AssetBucket,
    pub fund: &'static Fund,
    pub percentage: u32,
    pub monthly_amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioAllocation {
    pub age: u32,
    /// Non-zero buckets only, in bucket order.
    pub funds: Vec<FundAllocation>,
    /// Fraction of 1, like the per-fund ratios.
    pub weighted_expense_ratio: f64,
    pub stock_percentage: u32,
    pub bond_percentage: u32,
}

impl PortfolioAllocation {
    pub fn total_funds(&self) -> usize {
        self.funds.len()
    }

    pub fn get(&self, ticker: &str) -> Option<&FundAllocation> {
        self.funds.iter().find(|f| f.fund.ticker == ticker)
    }

    pub fn weighted_expense_ratio_pct(&self) -> f64 {
        self.weighted_expense_ratio * 100.0
    }

    /// Yearly fund expenses on twelve months of `monthly_contribution`.
    pub fn annual_expense(&self, monthly_contribution: f64) -> f64 {
        self.weighted_expense_ratio * monthly_contribution * 12.0
    }
}

pub fn allocate(age: u32, monthly_contribution: f64) -> PortfolioAllocation {
    let bracket = bracket_for_age(age);

    let mut funds = Vec::new();
    let mut weighted_expense_ratio = 0.0;
    let mut stock_percentage = 0;

    for (bucket, percentage) in bracket.iter() {
        if percentage == 0 {
            continue;
        }
        let fund = bucket.fund();
        let weight = percentage as f64 / 100.0;
        weighted_expense_ratio += weight * fund.expense_ratio;
        if !bucket.is_bond() {
            stock_percentage += percentage;
        }
        funds.push(FundAllocation {
            bucket,
            fund,
            percentage,
            monthly_amount: monthly_contribution * weight,
        });
    }

    PortfolioAllocation {
        age,
        funds,
        weighted_expense_ratio,
        stock_percentage,
        bond_percentage: 100 - stock_percentage,
    }
}
