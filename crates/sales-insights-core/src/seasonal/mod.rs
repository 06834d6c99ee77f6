pub mod engine;
pub mod reports;

pub use engine::{
    aggregate_shares, compute_seasonal_top_n_share, compute_top_n_share_by, AggregateRow,
    PartitionFilter, RankedResult, SeasonalShareInput, SecondaryFilter,
};
