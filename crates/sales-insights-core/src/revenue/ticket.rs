//! Customer-count and average-ticket reports.

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::calendar::MonthLabels;
use crate::types::{validate_records, Branch, Money, SaleRecord};
use crate::SalesInsightsResult;

/// Distinct customers of one (month, branch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerCountRow {
    pub month: u32,
    pub month_label: String,
    pub branch: Branch,
    pub unique_customers: u64,
}

/// Average ticket of one (month, branch): revenue over distinct customers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AverageTicketRow {
    pub month: u32,
    pub month_label: String,
    pub branch: Branch,
    pub revenue_total: Money,
    pub unique_customers: u64,
    pub avg_ticket: Money,
}

/// Distinct `customer_id` count per (month, branch), months in calendar
/// order. The same customer visiting both branches counts once in each.
pub fn monthly_unique_customers(
    records: &[SaleRecord],
    labels: &MonthLabels,
) -> SalesInsightsResult<Vec<CustomerCountRow>> {
    validate_records(records)?;
    let mut customers: BTreeMap<(u32, Branch), BTreeSet<&str>> = BTreeMap::new();
    for record in records {
        customers
            .entry((record.date.month(), record.branch))
            .or_default()
            .insert(record.customer_id.trim());
    }
    customers
        .into_iter()
        .map(|((month, branch), ids)| {
            Ok(CustomerCountRow {
                month,
                month_label: labels.label(month)?.to_string(),
                branch,
                unique_customers: ids.len() as u64,
            })
        })
        .collect()
}

/// Revenue total, distinct customers, and average ticket per (month,
/// branch). A group without customers cannot occur from real records, but a
/// zero count yields a zero ticket rather than dividing.
pub fn monthly_average_ticket(
    records: &[SaleRecord],
    labels: &MonthLabels,
) -> SalesInsightsResult<Vec<AverageTicketRow>> {
    validate_records(records)?;
    let mut groups: BTreeMap<(u32, Branch), (Decimal, BTreeSet<&str>)> = BTreeMap::new();
    for record in records {
        let entry = groups
            .entry((record.date.month(), record.branch))
            .or_insert((Decimal::ZERO, BTreeSet::new()));
        entry.0 += record.revenue;
        entry.1.insert(record.customer_id.trim());
    }
    groups
        .into_iter()
        .map(|((month, branch), (revenue_total, ids))| {
            let unique_customers = ids.len() as u64;
            let avg_ticket = if unique_customers == 0 {
                Decimal::ZERO
            } else {
                revenue_total / Decimal::from(unique_customers)
            };
            Ok(AverageTicketRow {
                month,
                month_label: labels.label(month)?.to_string(),
                branch,
                revenue_total,
                unique_customers,
                avg_ticket,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sale(month: u32, branch: Branch, customer: &str, revenue: Decimal) -> SaleRecord {
        SaleRecord {
            branch,
            date: NaiveDate::from_ymd_opt(2024, month, 8).unwrap(),
            category: "A".into(),
            subcategory: "sub".into(),
            product_name: "sku".into(),
            customer_id: customer.into(),
            quantity: dec!(1),
            revenue,
        }
    }

    #[test]
    fn test_unique_customers_dedupes_within_group() {
        let records = vec![
            sale(1, Branch::Street, "c-1", dec!(10)),
            sale(1, Branch::Street, "c-1", dec!(20)),
            sale(1, Branch::Street, "c-2", dec!(5)),
        ];
        let rows = monthly_unique_customers(&records, &MonthLabels::default()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].unique_customers, 2);
    }

    #[test]
    fn test_same_customer_counts_in_both_branches() {
        let records = vec![
            sale(1, Branch::Street, "c-1", dec!(10)),
            sale(1, Branch::Mall, "c-1", dec!(20)),
        ];
        let rows = monthly_unique_customers(&records, &MonthLabels::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].unique_customers, 1);
        assert_eq!(rows[1].unique_customers, 1);
    }

    #[test]
    fn test_average_ticket_divides_by_distinct_customers() {
        // Two visits by c-1 plus one by c-2: 90 revenue over 2 customers.
        let records = vec![
            sale(3, Branch::Street, "c-1", dec!(30)),
            sale(3, Branch::Street, "c-1", dec!(40)),
            sale(3, Branch::Street, "c-2", dec!(20)),
        ];
        let rows = monthly_average_ticket(&records, &MonthLabels::default()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].revenue_total, dec!(90));
        assert_eq!(rows[0].unique_customers, 2);
        assert_eq!(rows[0].avg_ticket, dec!(45));
    }

    #[test]
    fn test_average_ticket_per_branch_separately() {
        let records = vec![
            sale(3, Branch::Street, "c-1", dec!(30)),
            sale(3, Branch::Mall, "c-2", dec!(100)),
        ];
        let rows = monthly_average_ticket(&records, &MonthLabels::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].branch, Branch::Street);
        assert_eq!(rows[0].avg_ticket, dec!(30));
        assert_eq!(rows[1].branch, Branch::Mall);
        assert_eq!(rows[1].avg_ticket, dec!(100));
    }

    #[test]
    fn test_empty_records() {
        let rows = monthly_average_ticket(&[], &MonthLabels::default()).unwrap();
        assert!(rows.is_empty());
    }
}
