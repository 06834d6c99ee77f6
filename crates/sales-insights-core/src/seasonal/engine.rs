//! Seasonal top-N share aggregation engine.
//!
//! Computes, for each month (or any caller-derived partition key), the share
//! each sub-group contributes to that month's total of a measure, then keeps
//! the top N sub-groups per month:
//!
//! 1. **Secondary filter** -- optional set-membership restriction on another
//!    field, applied before aggregation.
//! 2. **Partition filter** -- keep only listed months, or all but listed
//!    months (both polarities).
//! 3. **Group & sum** -- (month, sub-group) sums of the selected measure.
//! 4. **Share** -- each row's sum as a percentage of its month's total.
//! 5. **Rank & truncate** -- share descending, ascending-label tie-break,
//!    first `top_n` rows per month.
//! 6. **Order** -- months emitted per the caller's display order.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use chrono::Datelike;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::SalesInsightsError;
use crate::types::{validate_records, GroupField, Measure, SaleRecord};
use crate::SalesInsightsResult;

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

/// Which months an aggregation keeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionFilter {
    /// Keep every observed month.
    All,
    /// Keep only the listed months (peak-month reports).
    Include(BTreeSet<u32>),
    /// Keep all but the listed months (off-peak reports).
    Exclude(BTreeSet<u32>),
}

impl PartitionFilter {
    fn keeps(&self, month: u32) -> bool {
        match self {
            PartitionFilter::All => true,
            PartitionFilter::Include(months) => months.contains(&month),
            PartitionFilter::Exclude(months) => !months.contains(&month),
        }
    }
}

/// Set-membership restriction on a record field, applied before aggregation.
/// Matching trims whitespace on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryFilter {
    pub field: GroupField,
    pub values: Vec<String>,
}

impl SecondaryFilter {
    pub fn new(field: GroupField, values: &[&str]) -> Self {
        SecondaryFilter {
            field,
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// Parameters for [`compute_seasonal_top_n_share`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalShareInput {
    pub measure: Measure,
    pub group_field: GroupField,
    pub partition_filter: PartitionFilter,
    pub secondary_filter: Option<SecondaryFilter>,
    /// Sub-groups retained per month. Must be >= 1; a value larger than the
    /// number of distinct sub-groups returns all of them.
    pub top_n: usize,
    /// Month numbers in final output order. Months with no data under the
    /// filters are absent from output; duplicates keep their first position.
    pub display_order: Vec<u32>,
}

/// One (month, sub-group) aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub month: u32,
    pub name: String,
    pub measure_sum: Decimal,
    pub partition_total: Decimal,
    pub share_pct: Decimal,
}

/// Ranked output: rows partitioned by month in display order, each partition
/// share-descending and truncated to the requested top N.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub rows: Vec<AggregateRow>,
}

impl RankedResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows of a single month, in rank order.
    pub fn month_rows(&self, month: u32) -> impl Iterator<Item = &AggregateRow> {
        self.rows.iter().filter(move |r| r.month == month)
    }
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Compute the top-N share table with months derived from the record date.
pub fn compute_seasonal_top_n_share(
    records: &[SaleRecord],
    input: &SeasonalShareInput,
) -> SalesInsightsResult<RankedResult> {
    compute_top_n_share_by(records, |r| r.date.month(), input)
}

/// Same contract as [`compute_seasonal_top_n_share`] with a caller-supplied
/// partition key derivation, for record sets whose partition is not the
/// calendar month of the sale date.
pub fn compute_top_n_share_by<P>(
    records: &[SaleRecord],
    partition_key: P,
    input: &SeasonalShareInput,
) -> SalesInsightsResult<RankedResult>
where
    P: Fn(&SaleRecord) -> u32,
{
    validate_input(input)?;
    let rows = aggregate_shares_by(
        records,
        partition_key,
        input.measure,
        input.group_field,
        &input.partition_filter,
        input.secondary_filter.as_ref(),
    )?;
    Ok(rank_and_order(rows, input.top_n, &input.display_order))
}

/// Pre-truncation share table (steps 1-4): every (month, sub-group) row that
/// survives the filters, months ascending, share descending within a month.
/// Within a month the shares sum to 100 unless the month's total is zero, in
/// which case every row carries a share of zero.
pub fn aggregate_shares(
    records: &[SaleRecord],
    measure: Measure,
    group_field: GroupField,
    partition_filter: &PartitionFilter,
    secondary_filter: Option<&SecondaryFilter>,
) -> SalesInsightsResult<Vec<AggregateRow>> {
    aggregate_shares_by(
        records,
        |r| r.date.month(),
        measure,
        group_field,
        partition_filter,
        secondary_filter,
    )
}

fn aggregate_shares_by<P>(
    records: &[SaleRecord],
    partition_key: P,
    measure: Measure,
    group_field: GroupField,
    partition_filter: &PartitionFilter,
    secondary_filter: Option<&SecondaryFilter>,
) -> SalesInsightsResult<Vec<AggregateRow>>
where
    P: Fn(&SaleRecord) -> u32,
{
    validate_records(records)?;

    let secondary_values: Option<(GroupField, BTreeSet<&str>)> = secondary_filter
        .map(|f| (f.field, f.values.iter().map(|v| v.trim()).collect()));

    // Group & sum the measure per (month, sub-group).
    let mut sums: BTreeMap<(u32, String), Decimal> = BTreeMap::new();
    for record in records {
        if let Some((field, values)) = &secondary_values {
            if !values.contains(field.value_of(record)) {
                continue;
            }
        }
        let month = partition_key(record);
        if !partition_filter.keeps(month) {
            continue;
        }
        let key = (month, group_field.value_of(record).to_string());
        *sums.entry(key).or_insert(Decimal::ZERO) += measure.of(record);
    }

    // Month totals.
    let mut totals: BTreeMap<u32, Decimal> = BTreeMap::new();
    for ((month, _), sum) in &sums {
        *totals.entry(*month).or_insert(Decimal::ZERO) += *sum;
    }

    // Shares. A zero month total yields zero shares rather than NaN.
    let mut rows: Vec<AggregateRow> = sums
        .into_iter()
        .map(|((month, name), measure_sum)| {
            let partition_total = totals[&month];
            let share_pct = if partition_total.is_zero() {
                Decimal::ZERO
            } else {
                measure_sum * dec!(100) / partition_total
            };
            AggregateRow {
                month,
                name,
                measure_sum,
                partition_total,
                share_pct,
            }
        })
        .collect();

    // Months ascending, then share descending with ascending-label tie-break.
    rows.sort_by(|a, b| {
        a.month
            .cmp(&b.month)
            .then_with(|| b.share_pct.cmp(&a.share_pct))
            .then_with(|| a.name.cmp(&b.name))
    });
    Ok(rows)
}

fn rank_and_order(rows: Vec<AggregateRow>, top_n: usize, display_order: &[u32]) -> RankedResult {
    let mut by_month: BTreeMap<u32, Vec<AggregateRow>> = BTreeMap::new();
    for row in rows {
        by_month.entry(row.month).or_default().push(row);
    }

    let mut out = Vec::new();
    for &month in display_order {
        // Removing as we go keeps a duplicated month at its first position.
        if let Some(mut month_rows) = by_month.remove(&month) {
            month_rows.truncate(top_n);
            out.extend(month_rows);
        }
    }
    RankedResult { rows: out }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &SeasonalShareInput) -> SalesInsightsResult<()> {
    if input.top_n < 1 {
        return Err(SalesInsightsError::InvalidInput {
            field: "top_n".into(),
            reason: "Must retain at least one sub-group per month.".into(),
        });
    }
    if input.display_order.is_empty() {
        return Err(SalesInsightsError::InvalidInput {
            field: "display_order".into(),
            reason: "At least one month must be requested for output.".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
