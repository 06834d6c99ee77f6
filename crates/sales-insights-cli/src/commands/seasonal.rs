use clap::Args;
use serde_json::Value;

use sales_insights_core::calendar::CALENDAR_MONTHS;
use sales_insights_core::seasonal::{
    compute_seasonal_top_n_share, reports, PartitionFilter, SeasonalShareInput, SecondaryFilter,
};

use super::{load_records, GroupByArg, MeasureArg};

/// Arguments for the seasonal top-N share table
#[derive(Args)]
pub struct SeasonalShareArgs {
    /// Path to JSON/CSV file with sale records
    #[arg(long)]
    pub input: Option<String>,

    /// Numeric field to sum
    #[arg(long, default_value = "quantity")]
    pub measure: MeasureArg,

    /// Sub-group dimension to rank
    #[arg(long = "group-by", default_value = "category")]
    pub group_by: GroupByArg,

    /// Keep only these months (e.g. "3,11,12"); also sets the output order
    #[arg(long, value_delimiter = ',')]
    pub months: Option<Vec<u32>>,

    /// Keep all but these months
    #[arg(long, value_delimiter = ',', conflicts_with = "months")]
    pub exclude_months: Option<Vec<u32>>,

    /// Restrict records to a field value before aggregating
    #[arg(long, requires = "filter_values")]
    pub filter_field: Option<GroupByArg>,

    /// Comma-separated values for --filter-field
    #[arg(long, value_delimiter = ',', requires = "filter_field")]
    pub filter_values: Option<Vec<String>>,

    /// Sub-groups retained per month
    #[arg(long, default_value = "3")]
    pub top_n: usize,
}

/// Arguments for the grand-total share ranking
#[derive(Args)]
pub struct TopGroupsArgs {
    /// Path to JSON/CSV file with sale records
    #[arg(long)]
    pub input: Option<String>,

    /// Numeric field to sum
    #[arg(long, default_value = "quantity")]
    pub measure: MeasureArg,

    /// Sub-group dimension to rank
    #[arg(long = "group-by", default_value = "category")]
    pub group_by: GroupByArg,

    /// Groups retained
    #[arg(long, default_value = "10")]
    pub top_n: usize,
}

/// Arguments for the top-products ranking
#[derive(Args)]
pub struct TopProductsArgs {
    /// Path to JSON/CSV file with sale records
    #[arg(long)]
    pub input: Option<String>,

    /// Numeric field to sum
    #[arg(long, default_value = "revenue")]
    pub measure: MeasureArg,

    /// Products retained
    #[arg(long, default_value = "20")]
    pub top_n: usize,
}

pub fn run_seasonal_share(args: SeasonalShareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = load_records(&args.input)?;

    let (partition_filter, display_order) = match (&args.months, &args.exclude_months) {
        (Some(months), _) => (
            PartitionFilter::Include(months.iter().copied().collect()),
            months.clone(),
        ),
        (None, Some(excluded)) => (
            PartitionFilter::Exclude(excluded.iter().copied().collect()),
            CALENDAR_MONTHS.to_vec(),
        ),
        (None, None) => (PartitionFilter::All, CALENDAR_MONTHS.to_vec()),
    };

    let secondary_filter = match (args.filter_field, args.filter_values) {
        (Some(field), Some(values)) => Some(SecondaryFilter {
            field: field.into(),
            values,
        }),
        _ => None,
    };

    let input = SeasonalShareInput {
        measure: args.measure.into(),
        group_field: args.group_by.into(),
        partition_filter,
        secondary_filter,
        top_n: args.top_n,
        display_order,
    };
    let result = compute_seasonal_top_n_share(&records, &input)?;
    Ok(serde_json::to_value(result.rows)?)
}

pub fn run_top_groups(args: TopGroupsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = load_records(&args.input)?;
    let rows = reports::overall_top_groups(
        &records,
        args.measure.into(),
        args.group_by.into(),
        args.top_n,
    )?;
    Ok(serde_json::to_value(rows)?)
}

pub fn run_top_products(args: TopProductsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = load_records(&args.input)?;
    let rows = reports::top_products(&records, args.measure.into(), args.top_n)?;
    Ok(serde_json::to_value(rows)?)
}
