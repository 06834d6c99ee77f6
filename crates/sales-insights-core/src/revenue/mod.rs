pub mod branch;
pub mod ticket;

pub use branch::{
    monthly_revenue, monthly_revenue_by_branch, revenue_by_branch, seasonal_branch_revenue,
    BranchRevenueRow, MonthlyBranchRevenueRow, MonthlyRevenueRow,
};
pub use ticket::{
    monthly_average_ticket, monthly_unique_customers, AverageTicketRow, CustomerCountRow,
};
