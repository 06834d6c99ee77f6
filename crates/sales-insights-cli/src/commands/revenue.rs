use clap::Args;
use serde_json::Value;

use sales_insights_core::calendar::MonthLabels;
use sales_insights_core::revenue::{
    monthly_average_ticket, monthly_revenue, monthly_revenue_by_branch, monthly_unique_customers,
    revenue_by_branch, seasonal_branch_revenue,
};

use super::load_records;

/// Arguments for the per-branch revenue total
#[derive(Args)]
pub struct BranchRevenueArgs {
    /// Path to JSON/CSV file with sale records
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the monthly revenue breakdown
#[derive(Args)]
pub struct MonthlyRevenueArgs {
    /// Path to JSON/CSV file with sale records
    #[arg(long)]
    pub input: Option<String>,

    /// Split each month per branch
    #[arg(long)]
    pub per_branch: bool,

    /// Restrict to these categories (implies --per-branch)
    #[arg(long, value_delimiter = ',')]
    pub categories: Option<Vec<String>>,
}

/// Arguments for the average-ticket report
#[derive(Args)]
pub struct AvgTicketArgs {
    /// Path to JSON/CSV file with sale records
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the unique-customer counts
#[derive(Args)]
pub struct UniqueCustomersArgs {
    /// Path to JSON/CSV file with sale records
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_branch_revenue(args: BranchRevenueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = load_records(&args.input)?;
    let rows = revenue_by_branch(&records)?;
    Ok(serde_json::to_value(rows)?)
}

pub fn run_monthly_revenue(args: MonthlyRevenueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = load_records(&args.input)?;
    let labels = MonthLabels::default();

    if let Some(categories) = &args.categories {
        let wanted: Vec<&str> = categories.iter().map(|c| c.as_str()).collect();
        let rows = seasonal_branch_revenue(&records, &wanted, &labels)?;
        return Ok(serde_json::to_value(rows)?);
    }
    if args.per_branch {
        let rows = monthly_revenue_by_branch(&records, &labels)?;
        return Ok(serde_json::to_value(rows)?);
    }
    let rows = monthly_revenue(&records, &labels)?;
    Ok(serde_json::to_value(rows)?)
}

pub fn run_avg_ticket(args: AvgTicketArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = load_records(&args.input)?;
    let rows = monthly_average_ticket(&records, &MonthLabels::default())?;
    Ok(serde_json::to_value(rows)?)
}

pub fn run_unique_customers(
    args: UniqueCustomersArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let records = load_records(&args.input)?;
    let rows = monthly_unique_customers(&records, &MonthLabels::default())?;
    Ok(serde_json::to_value(rows)?)
}
