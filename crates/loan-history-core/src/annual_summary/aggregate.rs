//! Calendar-year roll-up of an amortization schedule.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::loan::AmortizationEntry;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::LoanHistoryResult;

/// Repayment totals for one year of the loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualSummary {
    pub year_label: String,
    pub total_principal_paid: Money,
    pub total_interest_paid: Money,
    #[serde(default)]
    pub total_pre_emi_interest_paid: Money,
    #[serde(default)]
    pub total_prepayments_made: Money,
}

impl AnnualSummary {
    fn empty(year_label: String) -> Self {
        Self {
            year_label,
            total_principal_paid: Decimal::ZERO,
            total_interest_paid: Decimal::ZERO,
            total_pre_emi_interest_paid: Decimal::ZERO,
            total_prepayments_made: Decimal::ZERO,
        }
    }

    /// Regular plus pre-EMI interest.
    pub fn combined_interest(&self) -> Money {
        self.total_interest_paid + self.total_pre_emi_interest_paid
    }
}

/// Sum schedule entries by the calendar year of their payment date, in year
/// order.
pub fn summarize_by_year(schedule: &[AmortizationEntry]) -> Vec<AnnualSummary> {
    let mut years: BTreeMap<i32, AnnualSummary> = BTreeMap::new();
    for entry in schedule {
        let year = entry.payment_date.year();
        let summary = years
            .entry(year)
            .or_insert_with(|| AnnualSummary::empty(year.to_string()));
        summary.total_principal_paid += entry.principal_paid;
        summary.total_interest_paid += entry.interest_paid;
        summary.total_pre_emi_interest_paid += entry.pre_emi_interest_paid;
        summary.total_prepayments_made += entry.prepayment;
    }
    years.into_values().collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualSummaryInput {
    pub schedule: Vec<AmortizationEntry>,
}

pub fn annual_summary(
    input: &AnnualSummaryInput,
) -> LoanHistoryResult<ComputationOutput<Vec<AnnualSummary>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let has_breakdown = input.schedule.iter().any(|e| {
        !(e.principal_paid.is_zero()
            && e.interest_paid.is_zero()
            && e.pre_emi_interest_paid.is_zero()
            && e.prepayment.is_zero())
    });
    if !input.schedule.is_empty() && !has_breakdown {
        warnings.push(
            "Schedule entries carry no principal/interest breakdown; all totals are zero".into(),
        );
    }

    let summaries = summarize_by_year(&input.schedule);
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Calendar-year amortization roll-up",
        input,
        warnings,
        elapsed,
        summaries,
    ))
}
