use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::loan::{
    AdjustmentPreference, AmortizationEntry, Disbursement, EmiChange, LoanDetails, PaymentRecord,
    RateChange,
};
use crate::types::Money;

use super::narrative::{AmountStyle, Narrative};

/// Category of a timeline event. Variant order is the tie-break order for
/// events sharing a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    LoanStart,
    Disbursement,
    Prepayment,
    RoiChange,
    CustomEmi,
    LoanEnd,
}

impl EventKind {
    pub fn label(self) -> &'static str {
        match self {
            EventKind::LoanStart => "Loan Start",
            EventKind::Disbursement => "Disbursement",
            EventKind::Prepayment => "Prepayment",
            EventKind::RoiChange => "ROI Change",
            EventKind::CustomEmi => "Custom EMI",
            EventKind::LoanEnd => "Loan End",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            EventKind::LoanStart => "🏁",
            EventKind::Disbursement => "💸",
            EventKind::Prepayment => "💰",
            EventKind::RoiChange => "📈",
            EventKind::CustomEmi => "⚙️",
            EventKind::LoanEnd => "🏆",
        }
    }
}

/// Record an event was derived from.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "source", content = "record", rename_all = "snake_case")]
pub enum EventSource<'a> {
    LoanStart {
        details: &'a LoanDetails,
        initial_disbursement: Option<&'a Disbursement>,
    },
    Disbursement(&'a Disbursement),
    Payment(&'a PaymentRecord),
    RateChange(&'a RateChange),
    EmiChange(&'a EmiChange),
    ScheduleEntry(&'a AmortizationEntry),
}

/// Projected effect of an event on the amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Consequence {
    /// EMI recalculated; tenure kept.
    NewEmi { emi: Money, effective_month: u32 },
    /// EMI kept; tenure moves.
    EmiMaintained {
        emi: Money,
        effective_month: u32,
        remaining_tenure_months: u32,
    },
}

impl Consequence {
    pub fn emi(&self) -> Money {
        match self {
            Consequence::NewEmi { emi, .. } | Consequence::EmiMaintained { emi, .. } => *emi,
        }
    }

    pub fn narrative(&self, style: &AmountStyle<'_>) -> Narrative {
        match self {
            Consequence::NewEmi { emi, .. } => Narrative::new()
                .text(". New EMI: ")
                .emphasis(style.money(*emi))
                .text("."),
            Consequence::EmiMaintained {
                emi,
                remaining_tenure_months,
                ..
            } => Narrative::new()
                .text(". EMI maintained at ~")
                .emphasis(style.money(*emi))
                .text(format!(
                    ". Projected remaining tenure: {} months.",
                    remaining_tenure_months
                )),
        }
    }
}

/// One entry of the loan timeline. Built fresh for every render and borrows
/// from the caller's loan and schedule.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineEvent<'a> {
    pub date: NaiveDate,
    pub kind: EventKind,
    pub narrative: Narrative,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preference: Option<AdjustmentPreference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consequence: Option<Consequence>,
    pub source: EventSource<'a>,
}

impl<'a> TimelineEvent<'a> {
    pub fn new(
        date: NaiveDate,
        kind: EventKind,
        narrative: Narrative,
        source: EventSource<'a>,
    ) -> Self {
        Self {
            date,
            kind,
            narrative,
            preference: None,
            consequence: None,
            source,
        }
    }

    pub fn icon(&self) -> &'static str {
        self.kind.icon()
    }

    /// True for a Loan Start event with the initial disbursement folded in.
    pub fn has_initial_disbursement(&self) -> bool {
        matches!(
            self.source,
            EventSource::LoanStart {
                initial_disbursement: Some(_),
                ..
            }
        )
    }
}
