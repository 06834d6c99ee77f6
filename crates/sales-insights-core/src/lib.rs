pub mod calendar;
pub mod error;
pub mod types;

#[cfg(feature = "seasonal")]
pub mod seasonal;

#[cfg(feature = "revenue")]
pub mod revenue;

#[cfg(feature = "catalog")]
pub mod catalog;

#[cfg(feature = "dataset")]
pub mod dataset;

pub use error::SalesInsightsError;
pub use types::*;

/// Standard result type for all sales-insights operations
pub type SalesInsightsResult<T> = Result<T, SalesInsightsError>;
