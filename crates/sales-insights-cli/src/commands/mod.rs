pub mod catalog;
pub mod revenue;
pub mod seasonal;

use clap::ValueEnum;
use serde::de::DeserializeOwned;

use sales_insights_core::{GroupField, Measure, SaleRecord};

use crate::input;

/// CLI-facing mirror of the core `Measure` enum.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MeasureArg {
    Quantity,
    Revenue,
}

impl From<MeasureArg> for Measure {
    fn from(arg: MeasureArg) -> Self {
        match arg {
            MeasureArg::Quantity => Measure::Quantity,
            MeasureArg::Revenue => Measure::Revenue,
        }
    }
}

/// CLI-facing mirror of the core `GroupField` enum.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GroupByArg {
    Category,
    Subcategory,
    Product,
    Branch,
}

impl From<GroupByArg> for GroupField {
    fn from(arg: GroupByArg) -> Self {
        match arg {
            GroupByArg::Category => GroupField::Category,
            GroupByArg::Subcategory => GroupField::Subcategory,
            GroupByArg::Product => GroupField::ProductName,
            GroupByArg::Branch => GroupField::Branch,
        }
    }
}

/// Load rows from `--input` (JSON or CSV by extension) or piped stdin JSON.
pub(crate) fn load_rows<T: DeserializeOwned>(
    path: &Option<String>,
    what: &str,
) -> Result<Vec<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        if path.to_lowercase().ends_with(".csv") {
            input::file::read_csv(path)
        } else {
            input::file::read_json(path)
        }
    } else if let Some(value) = input::stdin::read_stdin()? {
        Ok(serde_json::from_value(value)?)
    } else {
        Err(format!("Provide --input file or pipe {what} JSON via stdin").into())
    }
}

pub(crate) fn load_records(
    path: &Option<String>,
) -> Result<Vec<SaleRecord>, Box<dyn std::error::Error>> {
    load_rows(path, "sale records")
}
