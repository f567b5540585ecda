//! Schedule correlation: locate the payment period an event lands in and
//! read the projected EMI / tenure off the precomputed schedule.

use chrono::NaiveDate;
use tracing::debug;

use crate::loan::{AdjustmentPreference, AmortizationEntry};

use super::event::Consequence;

/// An event that carries an adjustment preference.
#[derive(Debug, Clone, Copy)]
pub enum CorrelationTrigger<'p> {
    Prepayment(&'p AdjustmentPreference),
    RateChange(&'p AdjustmentPreference),
}

impl CorrelationTrigger<'_> {
    /// Whether the preference asks the lender to recalculate the EMI rather
    /// than keep it and move the tenure.
    pub fn recalculates_emi(&self) -> bool {
        match self {
            CorrelationTrigger::Prepayment(pref) => {
                matches!(pref, AdjustmentPreference::AdjustEmi)
            }
            CorrelationTrigger::RateChange(pref) => matches!(
                pref,
                AdjustmentPreference::AdjustEmi | AdjustmentPreference::CustomEmi
            ),
        }
    }

    pub fn preference(&self) -> &AdjustmentPreference {
        match self {
            CorrelationTrigger::Prepayment(p) | CorrelationTrigger::RateChange(p) => p,
        }
    }
}

/// First schedule entry paid on or after `date`, with its index.
///
/// Linear scan; the schedule is assumed to be ascending by payment date. An
/// entry dated exactly on `date` matches.
pub fn find_entry_on_or_after(
    schedule: &[AmortizationEntry],
    date: NaiveDate,
) -> Option<(usize, &AmortizationEntry)> {
    schedule
        .iter()
        .enumerate()
        .find(|(_, entry)| entry.payment_date >= date)
}

/// Derive the projected consequence of an event on the schedule.
///
/// Returns `None` when the event falls after every scheduled payment.
pub fn correlate(
    event_date: NaiveDate,
    trigger: CorrelationTrigger<'_>,
    schedule: &[AmortizationEntry],
) -> Option<Consequence> {
    let Some((index, entry)) = find_entry_on_or_after(schedule, event_date) else {
        debug!(
            %event_date,
            preference = %trigger.preference(),
            schedule_len = schedule.len(),
            "no schedule entry on or after event date"
        );
        return None;
    };

    debug!(
        %event_date,
        preference = %trigger.preference(),
        matched_index = index,
        matched_month = entry.month_number,
        emi = %entry.emi,
        "correlated event with schedule entry"
    );

    if trigger.recalculates_emi() {
        Some(Consequence::NewEmi {
            emi: entry.emi,
            effective_month: entry.month_number,
        })
    } else {
        Some(Consequence::EmiMaintained {
            emi: entry.emi,
            effective_month: entry.month_number,
            remaining_tenure_months: (schedule.len() - index) as u32,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
