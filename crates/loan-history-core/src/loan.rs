//! Loan aggregate and amortization schedule records.
//!
//! These are caller-owned snapshots. Nothing in this crate mutates them; the
//! timeline and chart builders only borrow.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

/// A closing balance at or below this is treated as fully repaid.
pub const PAYOFF_BALANCE_EPSILON: Decimal = dec!(0.01);

/// Remarks that mark a disbursement as the initial drawdown.
pub const INITIAL_DISBURSEMENT_REMARKS: &str = "Initial Disbursement";

// ---------------------------------------------------------------------------
// Loan aggregate
// ---------------------------------------------------------------------------

/// Static terms of the loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanDetails {
    pub start_date: NaiveDate,
    /// Annual rate at origination, in percent.
    pub original_interest_rate: Percent,
    pub original_tenure_months: u32,
    #[serde(default)]
    pub disbursements: Vec<Disbursement>,
}

/// A loan together with its recorded lifecycle events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub details: LoanDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_history: Option<Vec<PaymentRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate_changes: Option<Vec<RateChange>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_emi_changes: Option<Vec<EmiChange>>,
}

impl Loan {
    /// Payment-history records tagged as prepayments.
    pub fn prepayments(&self) -> impl Iterator<Item = &PaymentRecord> {
        self.payment_history
            .iter()
            .flatten()
            .filter(|p| p.kind == PaymentKind::Prepayment)
    }

    pub fn rate_changes(&self) -> &[RateChange] {
        self.interest_rate_changes.as_deref().unwrap_or_default()
    }

    pub fn emi_changes(&self) -> &[EmiChange] {
        self.custom_emi_changes.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Disbursement {
    pub date: NaiveDate,
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Kind tag on a payment-history record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentKind {
    Prepayment,
    Emi,
    Other(String),
}

impl From<String> for PaymentKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Prepayment" => PaymentKind::Prepayment,
            "EMI" => PaymentKind::Emi,
            _ => PaymentKind::Other(s),
        }
    }
}

impl From<PaymentKind> for String {
    fn from(k: PaymentKind) -> Self {
        match k {
            PaymentKind::Prepayment => "Prepayment".into(),
            PaymentKind::Emi => "EMI".into(),
            PaymentKind::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub date: NaiveDate,
    pub amount: Money,
    #[serde(rename = "type")]
    pub kind: PaymentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjustment_preference: Option<AdjustmentPreference>,
}

/// How the borrower asked the lender to absorb a prepayment or rate change.
///
/// Anything other than `AdjustEmi` / `CustomEmi` is read as "keep the EMI,
/// move the tenure". Unrecognised values keep their original spelling so they
/// can be echoed back in narratives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AdjustmentPreference {
    AdjustEmi,
    AdjustTenure,
    CustomEmi,
    Other(String),
}

impl AdjustmentPreference {
    /// The preference as recorded, or `None` when it is blank. A blank
    /// preference means none was chosen.
    pub fn recorded(pref: Option<&AdjustmentPreference>) -> Option<&AdjustmentPreference> {
        pref.filter(|p| !p.as_str().is_empty())
    }

    pub fn as_str(&self) -> &str {
        match self {
            AdjustmentPreference::AdjustEmi => "adjustEMI",
            AdjustmentPreference::AdjustTenure => "adjustTenure",
            AdjustmentPreference::CustomEmi => "customEMI",
            AdjustmentPreference::Other(s) => s,
        }
    }
}

impl fmt::Display for AdjustmentPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for AdjustmentPreference {
    fn from(s: String) -> Self {
        match s.as_str() {
            "adjustEMI" => AdjustmentPreference::AdjustEmi,
            "adjustTenure" => AdjustmentPreference::AdjustTenure,
            "customEMI" => AdjustmentPreference::CustomEmi,
            _ => AdjustmentPreference::Other(s),
        }
    }
}

impl From<AdjustmentPreference> for String {
    fn from(p: AdjustmentPreference) -> Self {
        match p {
            AdjustmentPreference::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateChange {
    pub date: NaiveDate,
    /// New annual rate, in percent.
    pub new_rate: Percent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjustment_preference: Option<AdjustmentPreference>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiChange {
    pub date: NaiveDate,
    pub new_emi: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

// ---------------------------------------------------------------------------
// Amortization schedule
// ---------------------------------------------------------------------------

/// One payment period of a precomputed amortization schedule.
///
/// Schedules are expected in ascending `payment_date` / `month_number` order.
/// The breakdown fields are optional; they are only read by the annual
/// roll-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationEntry {
    pub month_number: u32,
    pub payment_date: NaiveDate,
    pub emi: Money,
    pub closing_balance: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_balance: Option<Money>,
    #[serde(default)]
    pub principal_paid: Money,
    #[serde(default)]
    pub interest_paid: Money,
    #[serde(default)]
    pub pre_emi_interest_paid: Money,
    #[serde(default)]
    pub prepayment: Money,
}

impl AmortizationEntry {
    pub fn is_payoff(&self) -> bool {
        self.closing_balance <= PAYOFF_BALANCE_EPSILON
    }
}

/// Index of the first entry whose payment date is not strictly ascending, if
/// any.
pub fn first_out_of_order(schedule: &[AmortizationEntry]) -> Option<usize> {
    schedule
        .windows(2)
        .position(|w| w[1].payment_date < w[0].payment_date)
        .map(|i| i + 1)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_loan_deserializes_with_absent_optional_lists() {
        let loan: Loan = serde_json::from_value(json!({
            "details": {
                "start_date": "2024-01-01",
                "original_interest_rate": 8.5,
                "original_tenure_months": 240
            }
        }))
        .unwrap();

        assert!(loan.details.disbursements.is_empty());
        assert_eq!(loan.prepayments().count(), 0);
        assert!(loan.rate_changes().is_empty());
        assert!(loan.emi_changes().is_empty());
        assert_eq!(loan.details.original_interest_rate, dec!(8.5));
    }

    #[test]
    fn test_prepayments_filters_by_kind() {
        let loan: Loan = serde_json::from_value(json!({
            "details": {
                "start_date": "2024-01-01",
                "original_interest_rate": "8.5",
                "original_tenure_months": 240
            },
            "payment_history": [
                { "date": "2024-02-01", "amount": 10000, "type": "EMI" },
                { "date": "2024-03-10", "amount": 50000, "type": "Prepayment",
                  "adjustment_preference": "adjustEMI" },
                { "date": "2024-04-01", "amount": 10000, "type": "Bounce" }
            ]
        }))
        .unwrap();

        let prepayments: Vec<_> = loan.prepayments().collect();
        assert_eq!(prepayments.len(), 1);
        assert_eq!(prepayments[0].amount, dec!(50000));
        assert_eq!(
            prepayments[0].adjustment_preference,
            Some(AdjustmentPreference::AdjustEmi)
        );
        let history = loan.payment_history.as_ref().unwrap();
        assert_eq!(history[2].kind, PaymentKind::Other("Bounce".into()));
    }

    #[test]
    fn test_adjustment_preference_keeps_unknown_spelling() {
        let pref: AdjustmentPreference = serde_json::from_value(json!("reduceTenure")).unwrap();
        assert_eq!(pref, AdjustmentPreference::Other("reduceTenure".into()));
        assert_eq!(pref.to_string(), "reduceTenure");
        assert_eq!(
            serde_json::to_value(AdjustmentPreference::CustomEmi).unwrap(),
            json!("customEMI")
        );
    }

    #[test]
    fn test_blank_preference_is_not_recorded() {
        let blank: AdjustmentPreference = serde_json::from_value(json!("")).unwrap();
        assert_eq!(AdjustmentPreference::recorded(Some(&blank)), None);
        assert_eq!(AdjustmentPreference::recorded(None), None);

        let tenure = AdjustmentPreference::AdjustTenure;
        assert_eq!(AdjustmentPreference::recorded(Some(&tenure)), Some(&tenure));
    }

    #[test]
    fn test_payoff_threshold() {
        let mut entry = AmortizationEntry {
            month_number: 1,
            payment_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            emi: dec!(1000),
            closing_balance: dec!(0.01),
            opening_balance: None,
            principal_paid: Decimal::ZERO,
            interest_paid: Decimal::ZERO,
            pre_emi_interest_paid: Decimal::ZERO,
            prepayment: Decimal::ZERO,
        };
        assert!(entry.is_payoff());
        entry.closing_balance = dec!(0.02);
        assert!(!entry.is_payoff());
    }
}
