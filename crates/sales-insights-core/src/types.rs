use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SalesInsightsError;
use crate::SalesInsightsResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Sold unit counts. Fractional quantities occur for weighed goods.
pub type Quantity = Decimal;

/// Percentages expressed on the 0-100 scale (60.0 = 60%).
pub type Percent = Decimal;

/// Store branch type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Branch {
    Street,
    Mall,
}

impl Branch {
    /// Canonical label, as it appears in exported tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Branch::Street => "STREET",
            Branch::Mall => "MALL",
        }
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One retail transaction. Records are read-only inputs; every operation
/// derives new aggregate tables and never mutates the source set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecord {
    pub branch: Branch,
    pub date: NaiveDate,
    pub category: String,
    pub subcategory: String,
    pub product_name: String,
    pub customer_id: String,
    pub quantity: Quantity,
    pub revenue: Money,
}

/// Which numeric field an aggregation sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Quantity,
    Revenue,
}

impl Measure {
    pub fn of(&self, record: &SaleRecord) -> Decimal {
        match self {
            Measure::Quantity => record.quantity,
            Measure::Revenue => record.revenue,
        }
    }
}

/// The sub-key dimension being grouped or ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupField {
    Category,
    Subcategory,
    ProductName,
    Branch,
}

impl GroupField {
    /// Extract the grouping label from a record. Textual fields are trimmed:
    /// the source data carries stray surrounding whitespace (e.g. "Natal ").
    pub fn value_of<'a>(&self, record: &'a SaleRecord) -> &'a str {
        match self {
            GroupField::Category => record.category.trim(),
            GroupField::Subcategory => record.subcategory.trim(),
            GroupField::ProductName => record.product_name.trim(),
            GroupField::Branch => record.branch.as_str(),
        }
    }
}

/// Reject records with negative measures before aggregating.
pub fn validate_records(records: &[SaleRecord]) -> SalesInsightsResult<()> {
    for record in records {
        if record.quantity < Decimal::ZERO {
            return Err(SalesInsightsError::InvalidInput {
                field: "quantity".into(),
                reason: format!(
                    "Sale of '{}' on {} has negative quantity.",
                    record.product_name, record.date
                ),
            });
        }
        if record.revenue < Decimal::ZERO {
            return Err(SalesInsightsError::InvalidInput {
                field: "revenue".into(),
                reason: format!(
                    "Sale of '{}' on {} has negative revenue.",
                    record.product_name, record.date
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(quantity: Decimal, revenue: Decimal) -> SaleRecord {
        SaleRecord {
            branch: Branch::Street,
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            category: " Natal ".into(),
            subcategory: "Panettone".into(),
            product_name: "Panettone 500g".into(),
            customer_id: "c-001".into(),
            quantity,
            revenue,
        }
    }

    #[test]
    fn test_group_field_trims_labels() {
        let r = record(dec!(1), dec!(10));
        assert_eq!(GroupField::Category.value_of(&r), "Natal");
        assert_eq!(GroupField::Branch.value_of(&r), "STREET");
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let err = validate_records(&[record(dec!(-1), dec!(10))]).unwrap_err();
        assert!(matches!(
            err,
            SalesInsightsError::InvalidInput { ref field, .. } if field == "quantity"
        ));
    }

    #[test]
    fn test_negative_revenue_rejected() {
        let err = validate_records(&[record(dec!(1), dec!(-10))]).unwrap_err();
        assert!(matches!(
            err,
            SalesInsightsError::InvalidInput { ref field, .. } if field == "revenue"
        ));
    }

    #[test]
    fn test_empty_record_set_is_valid() {
        assert!(validate_records(&[]).is_ok());
    }
}
