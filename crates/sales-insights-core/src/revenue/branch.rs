//! Revenue breakdowns by branch and month.

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::calendar::MonthLabels;
use crate::types::{validate_records, Branch, Money, SaleRecord};
use crate::SalesInsightsResult;

/// Total revenue of one branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchRevenueRow {
    pub branch: Branch,
    pub revenue: Money,
}

/// One (month, branch) revenue total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBranchRevenueRow {
    pub month: u32,
    pub month_label: String,
    pub branch: Branch,
    pub revenue: Money,
}

/// One month's revenue total across branches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenueRow {
    pub month: u32,
    pub month_label: String,
    pub revenue: Money,
}

/// Total revenue per branch, branches in enum order.
pub fn revenue_by_branch(records: &[SaleRecord]) -> SalesInsightsResult<Vec<BranchRevenueRow>> {
    validate_records(records)?;
    let mut sums: BTreeMap<Branch, Decimal> = BTreeMap::new();
    for record in records {
        *sums.entry(record.branch).or_insert(Decimal::ZERO) += record.revenue;
    }
    Ok(sums
        .into_iter()
        .map(|(branch, revenue)| BranchRevenueRow { branch, revenue })
        .collect())
}

/// Revenue per (month, branch), months in calendar order.
pub fn monthly_revenue_by_branch(
    records: &[SaleRecord],
    labels: &MonthLabels,
) -> SalesInsightsResult<Vec<MonthlyBranchRevenueRow>> {
    validate_records(records)?;
    let mut sums: BTreeMap<(u32, Branch), Decimal> = BTreeMap::new();
    for record in records {
        *sums
            .entry((record.date.month(), record.branch))
            .or_insert(Decimal::ZERO) += record.revenue;
    }
    sums.into_iter()
        .map(|((month, branch), revenue)| {
            Ok(MonthlyBranchRevenueRow {
                month,
                month_label: labels.label(month)?.to_string(),
                branch,
                revenue,
            })
        })
        .collect()
}

/// Revenue per month, months in calendar order.
pub fn monthly_revenue(
    records: &[SaleRecord],
    labels: &MonthLabels,
) -> SalesInsightsResult<Vec<MonthlyRevenueRow>> {
    validate_records(records)?;
    let mut sums: BTreeMap<u32, Decimal> = BTreeMap::new();
    for record in records {
        *sums.entry(record.date.month()).or_insert(Decimal::ZERO) += record.revenue;
    }
    sums.into_iter()
        .map(|(month, revenue)| {
            Ok(MonthlyRevenueRow {
                month,
                month_label: labels.label(month)?.to_string(),
                revenue,
            })
        })
        .collect()
}

/// Revenue per (month, branch) restricted to a set of categories, for the
/// seasonal branch comparison. Category matching trims whitespace on both
/// sides. An empty result is legal when no category matches.
pub fn seasonal_branch_revenue(
    records: &[SaleRecord],
    categories: &[&str],
    labels: &MonthLabels,
) -> SalesInsightsResult<Vec<MonthlyBranchRevenueRow>> {
    validate_records(records)?;
    let wanted: BTreeSet<&str> = categories.iter().map(|c| c.trim()).collect();
    let mut sums: BTreeMap<(u32, Branch), Decimal> = BTreeMap::new();
    for record in records {
        if !wanted.contains(record.category.trim()) {
            continue;
        }
        *sums
            .entry((record.date.month(), record.branch))
            .or_insert(Decimal::ZERO) += record.revenue;
    }
    sums.into_iter()
        .map(|((month, branch), revenue)| {
            Ok(MonthlyBranchRevenueRow {
                month,
                month_label: labels.label(month)?.to_string(),
                branch,
                revenue,
            })
        })
        .collect()
}
