//! Report-level parametrizations of the share engine.
//!
//! Each function here backs one chart the rendering collaborator produces.
//! They all delegate to [`engine`](super::engine) with different parameters;
//! none of them re-implements grouping, share, or ranking logic.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::calendar::MonthLabels;
use crate::error::SalesInsightsError;
use crate::seasonal::engine::{
    aggregate_shares, compute_seasonal_top_n_share, PartitionFilter, RankedResult,
    SeasonalShareInput, SecondaryFilter,
};
use crate::types::{validate_records, GroupField, Measure, SaleRecord};
use crate::SalesInsightsResult;

// ---------------------------------------------------------------------------
// Output rows
// ---------------------------------------------------------------------------

/// One ranked (month, sub-group) row with its display label resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyShareRow {
    pub month: u32,
    pub month_label: String,
    pub name: String,
    pub measure_sum: Decimal,
    pub share_pct: Decimal,
}

/// One sub-group's share of the grand total across the whole record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareRow {
    pub name: String,
    pub measure_sum: Decimal,
    pub share_pct: Decimal,
}

/// One product's total with its category attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductTotalRow {
    pub product_name: String,
    pub category: String,
    pub total: Decimal,
}

fn with_labels(
    result: RankedResult,
    labels: &MonthLabels,
) -> SalesInsightsResult<Vec<MonthlyShareRow>> {
    result
        .rows
        .into_iter()
        .map(|row| {
            Ok(MonthlyShareRow {
                month: row.month,
                month_label: labels.label(row.month)?.to_string(),
                name: row.name,
                measure_sum: row.measure_sum,
                share_pct: row.share_pct,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Monthly share reports
// ---------------------------------------------------------------------------

/// Top N sub-groups of each listed month by share of that month's total.
/// Months are emitted in the order given.
pub fn top_groups_in_months(
    records: &[SaleRecord],
    measure: Measure,
    group_field: GroupField,
    top_n: usize,
    months: &[u32],
    labels: &MonthLabels,
) -> SalesInsightsResult<Vec<MonthlyShareRow>> {
    let input = SeasonalShareInput {
        measure,
        group_field,
        partition_filter: PartitionFilter::Include(months.iter().copied().collect()),
        secondary_filter: None,
        top_n,
        display_order: months.to_vec(),
    };
    with_labels(compute_seasonal_top_n_share(records, &input)?, labels)
}

/// Top N categories per listed month.
pub fn top_categories_in_months(
    records: &[SaleRecord],
    measure: Measure,
    top_n: usize,
    months: &[u32],
    labels: &MonthLabels,
) -> SalesInsightsResult<Vec<MonthlyShareRow>> {
    top_groups_in_months(records, measure, GroupField::Category, top_n, months, labels)
}

/// Top N subcategories per listed month.
pub fn top_subcategories_in_months(
    records: &[SaleRecord],
    measure: Measure,
    top_n: usize,
    months: &[u32],
    labels: &MonthLabels,
) -> SalesInsightsResult<Vec<MonthlyShareRow>> {
    top_groups_in_months(
        records,
        measure,
        GroupField::Subcategory,
        top_n,
        months,
        labels,
    )
}

/// Top N products within one category, ranked by their share of the
/// category's monthly total.
pub fn top_products_in_category(
    records: &[SaleRecord],
    category: &str,
    measure: Measure,
    top_n: usize,
    months: &[u32],
    labels: &MonthLabels,
) -> SalesInsightsResult<Vec<MonthlyShareRow>> {
    let input = SeasonalShareInput {
        measure,
        group_field: GroupField::ProductName,
        partition_filter: PartitionFilter::Include(months.iter().copied().collect()),
        secondary_filter: Some(SecondaryFilter::new(GroupField::Category, &[category])),
        top_n,
        display_order: months.to_vec(),
    };
    with_labels(compute_seasonal_top_n_share(records, &input)?, labels)
}

/// Branch split of one subcategory's monthly total.
pub fn branch_share_of_subcategory(
    records: &[SaleRecord],
    subcategory: &str,
    measure: Measure,
    months: &[u32],
    labels: &MonthLabels,
) -> SalesInsightsResult<Vec<MonthlyShareRow>> {
    let input = SeasonalShareInput {
        measure,
        group_field: GroupField::Branch,
        partition_filter: PartitionFilter::Include(months.iter().copied().collect()),
        secondary_filter: Some(SecondaryFilter::new(GroupField::Subcategory, &[subcategory])),
        // Two branches, so a top-2 keeps the full split.
        top_n: 2,
        display_order: months.to_vec(),
    };
    with_labels(compute_seasonal_top_n_share(records, &input)?, labels)
}

/// One category's share of each month's total, with the listed months
/// excluded. Months come out in calendar order.
pub fn category_share_excluding_months(
    records: &[SaleRecord],
    category: &str,
    measure: Measure,
    excluded_months: &[u32],
    labels: &MonthLabels,
) -> SalesInsightsResult<Vec<MonthlyShareRow>> {
    let rows = aggregate_shares(
        records,
        measure,
        GroupField::Category,
        &PartitionFilter::Exclude(excluded_months.iter().copied().collect()),
        None,
    )?;
    let target = category.trim();
    rows.into_iter()
        .filter(|row| row.name == target)
        .map(|row| {
            Ok(MonthlyShareRow {
                month: row.month,
                month_label: labels.label(row.month)?.to_string(),
                name: row.name,
                measure_sum: row.measure_sum,
                share_pct: row.share_pct,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Whole-year reports
// ---------------------------------------------------------------------------

/// Top N sub-groups by share of the grand total, no month partitioning.
pub fn overall_top_groups(
    records: &[SaleRecord],
    measure: Measure,
    group_field: GroupField,
    top_n: usize,
) -> SalesInsightsResult<Vec<ShareRow>> {
    if top_n < 1 {
        return Err(SalesInsightsError::InvalidInput {
            field: "top_n".into(),
            reason: "Must retain at least one sub-group.".into(),
        });
    }
    validate_records(records)?;

    let mut sums: BTreeMap<String, Decimal> = BTreeMap::new();
    for record in records {
        *sums
            .entry(group_field.value_of(record).to_string())
            .or_insert(Decimal::ZERO) += measure.of(record);
    }
    let grand_total: Decimal = sums.values().copied().sum();

    let mut rows: Vec<ShareRow> = sums
        .into_iter()
        .map(|(name, measure_sum)| {
            let share_pct = if grand_total.is_zero() {
                Decimal::ZERO
            } else {
                measure_sum * dec!(100) / grand_total
            };
            ShareRow {
                name,
                measure_sum,
                share_pct,
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        b.share_pct
            .cmp(&a.share_pct)
            .then_with(|| a.name.cmp(&b.name))
    });
    rows.truncate(top_n);
    Ok(rows)
}

/// Top N products by total measure across the whole record set, each with
/// its category attached for the renderer's colour grouping.
pub fn top_products(
    records: &[SaleRecord],
    measure: Measure,
    top_n: usize,
) -> SalesInsightsResult<Vec<ProductTotalRow>> {
    if top_n < 1 {
        return Err(SalesInsightsError::InvalidInput {
            field: "top_n".into(),
            reason: "Must retain at least one product.".into(),
        });
    }
    validate_records(records)?;

    let mut sums: BTreeMap<(String, String), Decimal> = BTreeMap::new();
    for record in records {
        let key = (
            record.product_name.trim().to_string(),
            record.category.trim().to_string(),
        );
        *sums.entry(key).or_insert(Decimal::ZERO) += measure.of(record);
    }

    let mut rows: Vec<ProductTotalRow> = sums
        .into_iter()
        .map(|((product_name, category), total)| ProductTotalRow {
            product_name,
            category,
            total,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.product_name.cmp(&b.product_name))
    });
    rows.truncate(top_n);
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Branch;
    use chrono::NaiveDate;

    fn sale(
        month: u32,
        branch: Branch,
        category: &str,
        subcategory: &str,
        product: &str,
        quantity: Decimal,
        revenue: Decimal,
    ) -> SaleRecord {
        SaleRecord {
            branch,
            date: NaiveDate::from_ymd_opt(2024, month, 5).unwrap(),
            category: category.into(),
            subcategory: subcategory.into(),
            product_name: product.into(),
            customer_id: "c-001".into(),
            quantity,
            revenue,
        }
    }

    fn fixture() -> Vec<SaleRecord> {
        vec![
            sale(3, Branch::Street, "Natal", "Panettone", "Panettone 500g", dec!(60), dec!(600)),
            sale(3, Branch::Mall, "Natal", "Panettone", "Panettone 1kg", dec!(20), dec!(400)),
            sale(3, Branch::Street, "Pascoa", "Ovos", "Ovo 200g", dec!(20), dec!(300)),
            sale(11, Branch::Mall, "Natal", "Chester", "Chester 3kg", dec!(50), dec!(900)),
            sale(11, Branch::Street, "Pascoa", "Ovos", "Ovo 200g", dec!(50), dec!(500)),
            sale(6, Branch::Street, "Natal", "Panettone", "Panettone 500g", dec!(10), dec!(100)),
            sale(6, Branch::Mall, "Pascoa", "Ovos", "Ovo 400g", dec!(30), dec!(450)),
        ]
    }

    #[test]
    fn test_top_categories_in_months() {
        let rows = top_categories_in_months(
            &fixture(),
            Measure::Quantity,
            1,
            &[3, 11],
            &MonthLabels::default(),
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].month_label, "Mar");
        assert_eq!(rows[0].name, "Natal");
        assert_eq!(rows[0].share_pct, dec!(80));
        assert_eq!(rows[1].month_label, "Nov");
        // Month 11 ties 50/50; ascending label puts Natal first.
        assert_eq!(rows[1].name, "Natal");
    }

    #[test]
    fn test_top_products_in_category_shares_against_category_total() {
        let rows = top_products_in_category(
            &fixture(),
            "Natal",
            Measure::Quantity,
            5,
            &[3],
            &MonthLabels::default(),
        )
        .unwrap();
        // March Natal total is 80: 500g 75%, 1kg 25%.
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Panettone 500g");
        assert_eq!(rows[0].share_pct, dec!(75));
        assert_eq!(rows[1].share_pct, dec!(25));
    }

    #[test]
    fn test_branch_share_of_subcategory() {
        let rows = branch_share_of_subcategory(
            &fixture(),
            "Panettone",
            Measure::Quantity,
            &[3],
            &MonthLabels::default(),
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "STREET");
        assert_eq!(rows[0].share_pct, dec!(75));
        assert_eq!(rows[1].name, "MALL");
        assert_eq!(rows[1].share_pct, dec!(25));
    }

    #[test]
    fn test_category_share_excluding_months() {
        let rows = category_share_excluding_months(
            &fixture(),
            "Natal",
            Measure::Quantity,
            &[3, 11],
            &MonthLabels::default(),
        )
        .unwrap();
        // Only June survives the exclusion: Natal 10 of 40 = 25%.
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].month_label, "Jun");
        assert_eq!(rows[0].share_pct, dec!(25));
    }

    #[test]
    fn test_overall_top_groups_shares_of_grand_total() {
        let rows =
            overall_top_groups(&fixture(), Measure::Quantity, GroupField::Category, 10).unwrap();
        // Quantities: Natal 140, Pascoa 100, total 240.
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Natal");
        assert_eq!(
            rows[0].share_pct.round_dp(4),
            (dec!(140) * dec!(100) / dec!(240)).round_dp(4)
        );
        let total: Decimal = rows.iter().map(|r| r.share_pct).sum();
        assert!((total - dec!(100)).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_overall_top_groups_truncates() {
        let rows =
            overall_top_groups(&fixture(), Measure::Quantity, GroupField::ProductName, 2).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].share_pct >= rows[1].share_pct);
    }

    #[test]
    fn test_top_products_by_revenue() {
        let rows = top_products(&fixture(), Measure::Revenue, 3).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].product_name, "Chester 3kg");
        assert_eq!(rows[0].category, "Natal");
        assert_eq!(rows[0].total, dec!(900));
        // Ovo 200g appears in two months and sums across them.
        assert_eq!(rows[1].product_name, "Ovo 200g");
        assert_eq!(rows[1].total, dec!(800));
    }

    #[test]
    fn test_empty_months_rejected() {
        let err = top_categories_in_months(
            &fixture(),
            Measure::Quantity,
            3,
            &[],
            &MonthLabels::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SalesInsightsError::InvalidInput { ref field, .. } if field == "display_order"
        ));
    }

    #[test]
    fn test_unknown_category_yields_empty() {
        let rows = top_products_in_category(
            &fixture(),
            "Missing",
            Measure::Quantity,
            3,
            &[3],
            &MonthLabels::default(),
        )
        .unwrap();
        assert!(rows.is_empty());
    }
}
