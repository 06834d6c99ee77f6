use clap::{Args, ValueEnum};
use serde_json::Value;

use sales_insights_core::catalog::{catalog_group_share, CatalogEntry, CatalogField};

use super::load_rows;

/// CLI-facing mirror of the core `CatalogField` enum.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CatalogByArg {
    Category,
    Subcategory,
}

impl From<CatalogByArg> for CatalogField {
    fn from(arg: CatalogByArg) -> Self {
        match arg {
            CatalogByArg::Category => CatalogField::Category,
            CatalogByArg::Subcategory => CatalogField::Subcategory,
        }
    }
}

/// Arguments for the catalog composition share
#[derive(Args)]
pub struct CatalogShareArgs {
    /// Path to JSON/CSV file with catalog entries
    #[arg(long)]
    pub input: Option<String>,

    /// Catalog dimension to break down
    #[arg(long, default_value = "category")]
    pub by: CatalogByArg,

    /// Groups retained
    #[arg(long, default_value = "10")]
    pub top_n: usize,

    /// Placeholder labels to drop before normalizing (e.g. "Sem categoria,")
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,
}

pub fn run_catalog_share(args: CatalogShareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let entries: Vec<CatalogEntry> = load_rows(&args.input, "catalog entries")?;
    let excluded: Vec<&str> = args.exclude.iter().map(|l| l.as_str()).collect();
    let rows = catalog_group_share(&entries, args.by.into(), args.top_n, &excluded)?;
    Ok(serde_json::to_value(rows)?)
}
