use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use sales_insights_core::calendar::MonthLabels;
use sales_insights_core::revenue::{
    monthly_average_ticket, monthly_revenue, monthly_revenue_by_branch, monthly_unique_customers,
    revenue_by_branch, seasonal_branch_revenue,
};
use sales_insights_core::{Branch, SaleRecord};

fn sale(month: u32, branch: Branch, category: &str, customer: &str, revenue: Decimal) -> SaleRecord {
    SaleRecord {
        branch,
        date: NaiveDate::from_ymd_opt(2024, month, 3).unwrap(),
        category: category.into(),
        subcategory: "sub".into(),
        product_name: "sku".into(),
        customer_id: customer.into(),
        quantity: dec!(1),
        revenue,
    }
}

fn fixture() -> Vec<SaleRecord> {
    vec![
        sale(1, Branch::Street, "Grocery", "c-1", dec!(120)),
        sale(1, Branch::Street, "Grocery", "c-2", dec!(80)),
        sale(1, Branch::Mall, "Apparel", "c-3", dec!(300)),
        sale(2, Branch::Street, "Grocery", "c-1", dec!(60)),
        sale(2, Branch::Mall, "Natal", "c-2", dec!(140)),
        sale(2, Branch::Mall, "Natal", "c-2", dec!(100)),
    ]
}

#[test]
fn test_branch_totals() {
    let rows = revenue_by_branch(&fixture()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].branch, Branch::Street);
    assert_eq!(rows[0].revenue, dec!(260));
    assert_eq!(rows[1].branch, Branch::Mall);
    assert_eq!(rows[1].revenue, dec!(540));
}

#[test]
fn test_monthly_by_branch_reconciles_with_monthly_totals() {
    let labels = MonthLabels::default();
    let per_branch = monthly_revenue_by_branch(&fixture(), &labels).unwrap();
    let per_month = monthly_revenue(&fixture(), &labels).unwrap();
    for month_row in &per_month {
        let split: Decimal = per_branch
            .iter()
            .filter(|r| r.month == month_row.month)
            .map(|r| r.revenue)
            .sum();
        assert_eq!(split, month_row.revenue, "month {}", month_row.month);
    }
}

#[test]
fn test_monthly_rows_in_calendar_order_with_labels() {
    let rows = monthly_revenue(&fixture(), &MonthLabels::default()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].month_label, "Jan");
    assert_eq!(rows[0].revenue, dec!(500));
    assert_eq!(rows[1].month_label, "Feb");
    assert_eq!(rows[1].revenue, dec!(300));
}

#[test]
fn test_seasonal_branch_revenue_category_restriction() {
    let rows =
        seasonal_branch_revenue(&fixture(), &["Natal"], &MonthLabels::default()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].month, 2);
    assert_eq!(rows[0].branch, Branch::Mall);
    assert_eq!(rows[0].revenue, dec!(240));
}

#[test]
fn test_unique_customers_per_month_and_branch() {
    let rows = monthly_unique_customers(&fixture(), &MonthLabels::default()).unwrap();
    // (1, Street): c-1, c-2; (1, Mall): c-3; (2, Street): c-1; (2, Mall): c-2.
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].unique_customers, 2);
    assert_eq!(rows[1].unique_customers, 1);
    assert_eq!(rows[3].unique_customers, 1);
}

#[test]
fn test_average_ticket_uses_distinct_customers() {
    let rows = monthly_average_ticket(&fixture(), &MonthLabels::default()).unwrap();
    // (2, Mall): 240 revenue, one distinct customer.
    let feb_mall = rows
        .iter()
        .find(|r| r.month == 2 && r.branch == Branch::Mall)
        .unwrap();
    assert_eq!(feb_mall.unique_customers, 1);
    assert_eq!(feb_mall.avg_ticket, dec!(240));
    // (1, Street): 200 revenue over two customers.
    let jan_street = rows
        .iter()
        .find(|r| r.month == 1 && r.branch == Branch::Street)
        .unwrap();
    assert_eq!(jan_street.avg_ticket, dec!(100));
}
