use serde::{Deserialize, Serialize};

use crate::error::LoanHistoryError;
use crate::LoanHistoryResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = rust_decimal::Decimal;

/// Annual interest rates as quoted on loan documents (8.5 = 8.5%).
pub type Percent = rust_decimal::Decimal;

/// Currency code
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    INR,
    USD,
    GBP,
    EUR,
    CHF,
    JPY,
    CAD,
    AUD,
    SGD,
    Other(String),
}

impl Currency {
    /// Parse an ISO-style currency code. Unknown but well-formed codes map to
    /// `Currency::Other`.
    pub fn from_code(code: &str) -> LoanHistoryResult<Self> {
        let code = code.trim().to_ascii_uppercase();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(LoanHistoryError::InvalidInput {
                field: "currency".into(),
                reason: format!("'{}' is not a currency code", code),
            });
        }
        Ok(match code.as_str() {
            "INR" => Currency::INR,
            "USD" => Currency::USD,
            "GBP" => Currency::GBP,
            "EUR" => Currency::EUR,
            "CHF" => Currency::CHF,
            "JPY" => Currency::JPY,
            "CAD" => Currency::CAD,
            "AUD" => Currency::AUD,
            "SGD" => Currency::SGD,
            _ => Currency::Other(code),
        })
    }

    pub fn code(&self) -> &str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
            Currency::EUR => "EUR",
            Currency::CHF => "CHF",
            Currency::JPY => "JPY",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
            Currency::SGD => "SGD",
            Currency::Other(code) => code,
        }
    }

    /// Display prefix for amounts. Codes without a well-known symbol are
    /// prefixed with the code itself.
    pub fn symbol(&self) -> String {
        match self {
            Currency::INR => "₹".into(),
            Currency::USD => "$".into(),
            Currency::GBP => "£".into(),
            Currency::EUR => "€".into(),
            Currency::JPY => "¥".into(),
            Currency::CAD => "CA$".into(),
            Currency::AUD => "A$".into(),
            Currency::SGD => "S$".into(),
            Currency::CHF => "CHF ".into(),
            Currency::Other(code) => format!("{} ", code),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
