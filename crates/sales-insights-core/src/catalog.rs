//! Product catalog composition.
//!
//! Counts catalogued products per category or subcategory and normalizes to
//! a percentage of the labelled total, after dropping placeholder labels
//! (the catalog export marks unclassified products with a placeholder
//! category or an empty string).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::SalesInsightsError;
use crate::types::Percent;
use crate::SalesInsightsResult;

/// One product catalog row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub product_name: String,
    pub category: String,
    pub subcategory: String,
}

/// Which catalog dimension to break down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogField {
    Category,
    Subcategory,
}

impl CatalogField {
    fn value_of<'a>(&self, entry: &'a CatalogEntry) -> &'a str {
        match self {
            CatalogField::Category => entry.category.trim(),
            CatalogField::Subcategory => entry.subcategory.trim(),
        }
    }
}

/// One group's count and share of the labelled catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogShareRow {
    pub name: String,
    pub count: u64,
    pub share_pct: Percent,
}

/// Top N groups by count share of the catalog, excluding the trimmed
/// placeholder labels. Share descending, ascending-label tie-break.
pub fn catalog_group_share(
    entries: &[CatalogEntry],
    field: CatalogField,
    top_n: usize,
    excluded_labels: &[&str],
) -> SalesInsightsResult<Vec<CatalogShareRow>> {
    if top_n < 1 {
        return Err(SalesInsightsError::InvalidInput {
            field: "top_n".into(),
            reason: "Must retain at least one group.".into(),
        });
    }

    let excluded: BTreeSet<&str> = excluded_labels.iter().map(|l| l.trim()).collect();
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for entry in entries {
        let label = field.value_of(entry);
        if excluded.contains(label) {
            continue;
        }
        *counts.entry(label.to_string()).or_insert(0) += 1;
    }
    let total: u64 = counts.values().sum();

    let mut rows: Vec<CatalogShareRow> = counts
        .into_iter()
        .map(|(name, count)| CatalogShareRow {
            name,
            count,
            share_pct: if total == 0 {
                Decimal::ZERO
            } else {
                Decimal::from(count) * dec!(100) / Decimal::from(total)
            },
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
