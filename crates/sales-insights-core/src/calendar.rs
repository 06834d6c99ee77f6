//! Month labelling for report output.
//!
//! The label map is an explicit configuration value handed to each report
//! call; reports over the same record set may use different locales.

use serde::{Deserialize, Serialize};

use crate::error::SalesInsightsError;
use crate::SalesInsightsResult;

/// Calendar months in display order.
pub const CALENDAR_MONTHS: [u32; 12] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

/// Month-number to display-label mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthLabels {
    labels: [String; 12],
}

impl MonthLabels {
    pub fn new(labels: [&str; 12]) -> Self {
        MonthLabels {
            labels: labels.map(String::from),
        }
    }

    /// Label for a 1-based month number.
    pub fn label(&self, month: u32) -> SalesInsightsResult<&str> {
        if !(1..=12).contains(&month) {
            return Err(SalesInsightsError::DateError(format!(
                "Month number {month} is outside 1..=12."
            )));
        }
        Ok(&self.labels[(month - 1) as usize])
    }

    /// Labels for a list of month numbers, in the given order.
    pub fn labels_for(&self, months: &[u32]) -> SalesInsightsResult<Vec<String>> {
        months
            .iter()
            .map(|&m| self.label(m).map(String::from))
            .collect()
    }

    /// All twelve labels in calendar order.
    pub fn ordered(&self) -> &[String] {
        &self.labels
    }
}

impl Default for MonthLabels {
    fn default() -> Self {
        MonthLabels::new([
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels() {
        let labels = MonthLabels::default();
        assert_eq!(labels.label(1).unwrap(), "Jan");
        assert_eq!(labels.label(12).unwrap(), "Dec");
    }

    #[test]
    fn test_out_of_range_month() {
        let labels = MonthLabels::default();
        assert!(labels.label(0).is_err());
        assert!(labels.label(13).is_err());
    }

    #[test]
    fn test_labels_for_preserves_order() {
        let labels = MonthLabels::default();
        assert_eq!(
            labels.labels_for(&[3, 11, 12]).unwrap(),
            vec!["Mar", "Nov", "Dec"]
        );
    }

    #[test]
    fn test_custom_locale() {
        let pt = MonthLabels::new([
            "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
        ]);
        assert_eq!(pt.label(2).unwrap(), "Fev");
    }
}
