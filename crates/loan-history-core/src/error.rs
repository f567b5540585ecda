use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanHistoryError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LoanHistoryError {
    fn from(e: serde_json::Error) -> Self {
        LoanHistoryError::SerializationError(e.to_string())
    }
}
