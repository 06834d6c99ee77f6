mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::catalog::CatalogShareArgs;
use commands::revenue::{
    AvgTicketArgs, BranchRevenueArgs, MonthlyRevenueArgs, UniqueCustomersArgs,
};
use commands::seasonal::{SeasonalShareArgs, TopGroupsArgs, TopProductsArgs};

/// Retail sales aggregation and ranking reports
#[derive(Parser)]
#[command(
    name = "sia",
    version,
    about = "Retail sales aggregation and ranking reports",
    long_about = "A CLI for computing retail sales report tables with decimal \
                  precision. Supports seasonal top-N share rankings, branch \
                  revenue breakdowns, average ticket trends, unique customer \
                  counts, and catalog composition."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Top-N share of each month's total per category/subcategory/product/branch
    SeasonalShare(SeasonalShareArgs),
    /// Top groups by share of the grand total across the whole record set
    TopGroups(TopGroupsArgs),
    /// Top products by total volume or revenue, with category attached
    TopProducts(TopProductsArgs),
    /// Total revenue per branch
    BranchRevenue(BranchRevenueArgs),
    /// Monthly revenue, optionally split per branch or restricted to categories
    MonthlyRevenue(MonthlyRevenueArgs),
    /// Average ticket (revenue over distinct customers) per month and branch
    AvgTicket(AvgTicketArgs),
    /// Distinct customer counts per month and branch
    UniqueCustomers(UniqueCustomersArgs),
    /// Catalog composition share per category or subcategory
    CatalogShare(CatalogShareArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::SeasonalShare(args) => commands::seasonal::run_seasonal_share(args),
        Commands::TopGroups(args) => commands::seasonal::run_top_groups(args),
        Commands::TopProducts(args) => commands::seasonal::run_top_products(args),
        Commands::BranchRevenue(args) => commands::revenue::run_branch_revenue(args),
        Commands::MonthlyRevenue(args) => commands::revenue::run_monthly_revenue(args),
        Commands::AvgTicket(args) => commands::revenue::run_avg_ticket(args),
        Commands::UniqueCustomers(args) => commands::revenue::run_unique_customers(args),
        Commands::CatalogShare(args) => commands::catalog::run_catalog_share(args),
        Commands::Version => {
            println!("sia {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
