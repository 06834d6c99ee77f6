use thiserror::Error;

#[derive(Debug, Error)]
pub enum SalesInsightsError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for SalesInsightsError {
    fn from(e: serde_json::Error) -> Self {
        SalesInsightsError::SerializationError(e.to_string())
    }
}
