pub mod error;
pub mod formatting;
pub mod loan;
pub mod types;

#[cfg(feature = "timeline")]
pub mod timeline;

#[cfg(feature = "annual_summary")]
pub mod annual_summary;

pub use error::LoanHistoryError;
pub use types::*;

/// Standard result type for all loan-history operations
pub type LoanHistoryResult<T> = Result<T, LoanHistoryError>;
