//! Event harvesting: turn a loan and its schedule into unsorted timeline
//! events.
//!
//! Events come out in a fixed category order (start, disbursements,
//! prepayments, rate changes, custom EMI changes, end) so that a stable sort
//! by date keeps that order for same-day events.

use tracing::debug;

use crate::formatting::format_percent;
use crate::loan::{
    AdjustmentPreference, AmortizationEntry, Disbursement, EmiChange, Loan, LoanDetails,
    PaymentRecord, RateChange, INITIAL_DISBURSEMENT_REMARKS,
};

use super::correlate::{correlate, CorrelationTrigger};
use super::event::{EventKind, EventSource, TimelineEvent};
use super::narrative::{AmountStyle, Narrative};

/// Harvest every lifecycle event of `loan`, correlating prepayments and rate
/// changes against `schedule`.
pub fn harvest_events<'a>(
    loan: &'a Loan,
    schedule: &'a [AmortizationEntry],
    style: &AmountStyle<'_>,
) -> Vec<TimelineEvent<'a>> {
    let details = &loan.details;
    debug!(
        start_date = %details.start_date,
        disbursements = details.disbursements.len(),
        schedule_len = schedule.len(),
        "harvesting loan events"
    );

    let mut events = Vec::new();

    let initial = initial_disbursement(details);
    events.push(loan_start_event(details, initial, style));

    let skip = usize::from(initial.is_some());
    events.extend(
        details
            .disbursements
            .iter()
            .skip(skip)
            .map(|d| disbursement_event(d, style)),
    );

    events.extend(loan.prepayments().map(|p| prepayment_event(p, schedule, style)));
    events.extend(
        loan.rate_changes()
            .iter()
            .map(|c| rate_change_event(c, schedule, style)),
    );
    events.extend(loan.emi_changes().iter().map(|c| emi_change_event(c, style)));

    if let Some(end) = loan_end_event(schedule) {
        events.push(end);
    }

    debug!(events = events.len(), "harvested loan events");
    events
}

/// The first disbursement, when it is the initial drawdown on the start date.
fn initial_disbursement(details: &LoanDetails) -> Option<&Disbursement> {
    details.disbursements.first().filter(|d| {
        d.date == details.start_date && d.remarks.as_deref() == Some(INITIAL_DISBURSEMENT_REMARKS)
    })
}

fn loan_start_event<'a>(
    details: &'a LoanDetails,
    initial: Option<&'a Disbursement>,
    style: &AmountStyle<'_>,
) -> TimelineEvent<'a> {
    let mut narrative = Narrative::new()
        .text("Loan started with initial rate ")
        .emphasis(format_percent(details.original_interest_rate))
        .text(" for ")
        .emphasis(details.original_tenure_months.to_string())
        .text(" months.");
    if let Some(d) = initial {
        narrative.push_text(" Initial disbursement: ");
        narrative.push_emphasis(style.money(d.amount));
        narrative.push_text(".");
    }
    TimelineEvent::new(
        details.start_date,
        EventKind::LoanStart,
        narrative,
        EventSource::LoanStart {
            details,
            initial_disbursement: initial,
        },
    )
}

fn disbursement_event<'a>(d: &'a Disbursement, style: &AmountStyle<'_>) -> TimelineEvent<'a> {
    let mut narrative = Narrative::new()
        .text("Disbursed: ")
        .emphasis(style.money(d.amount))
        .text(".");
    push_remarks(&mut narrative, d.remarks.as_deref());
    TimelineEvent::new(
        d.date,
        EventKind::Disbursement,
        narrative,
        EventSource::Disbursement(d),
    )
}

fn prepayment_event<'a>(
    p: &'a PaymentRecord,
    schedule: &[AmortizationEntry],
    style: &AmountStyle<'_>,
) -> TimelineEvent<'a> {
    let mut narrative = Narrative::new()
        .text("Prepayment: ")
        .emphasis(style.money(p.amount))
        .text(".");
    push_remarks(&mut narrative, p.remarks.as_deref());

    let mut event = TimelineEvent::new(
        p.date,
        EventKind::Prepayment,
        narrative,
        EventSource::Payment(p),
    );
    if let Some(pref) = AdjustmentPreference::recorded(p.adjustment_preference.as_ref()) {
        attach_consequence(
            &mut event,
            CorrelationTrigger::Prepayment(pref),
            schedule,
            style,
        );
    }
    event
}

fn rate_change_event<'a>(
    c: &'a RateChange,
    schedule: &[AmortizationEntry],
    style: &AmountStyle<'_>,
) -> TimelineEvent<'a> {
    let narrative = Narrative::new()
        .text("Interest rate changed to ")
        .emphasis(format_percent(c.new_rate))
        .text(".");

    let mut event = TimelineEvent::new(
        c.date,
        EventKind::RoiChange,
        narrative,
        EventSource::RateChange(c),
    );
    if let Some(pref) = AdjustmentPreference::recorded(c.adjustment_preference.as_ref()) {
        attach_consequence(
            &mut event,
            CorrelationTrigger::RateChange(pref),
            schedule,
            style,
        );
    }
    event
}

fn emi_change_event<'a>(c: &'a EmiChange, style: &AmountStyle<'_>) -> TimelineEvent<'a> {
    let mut narrative = Narrative::new()
        .text("EMI set to ")
        .emphasis(style.money(c.new_emi))
        .text(".");
    push_remarks(&mut narrative, c.remarks.as_deref());
    TimelineEvent::new(
        c.date,
        EventKind::CustomEmi,
        narrative,
        EventSource::EmiChange(c),
    )
}

fn loan_end_event(schedule: &[AmortizationEntry]) -> Option<TimelineEvent<'_>> {
    let last = schedule.last().filter(|e| e.is_payoff())?;
    let narrative = Narrative::new()
        .text("Loan fully paid off. Total tenure: ")
        .emphasis(last.month_number.to_string())
        .text(" months.");
    Some(TimelineEvent::new(
        last.payment_date,
        EventKind::LoanEnd,
        narrative,
        EventSource::ScheduleEntry(last),
    ))
}

/// Record the preference on the event and append the correlated consequence,
/// if the schedule has a period on or after the event date.
fn attach_consequence(
    event: &mut TimelineEvent<'_>,
    trigger: CorrelationTrigger<'_>,
    schedule: &[AmortizationEntry],
    style: &AmountStyle<'_>,
) {
    let pref = trigger.preference();
    event
        .narrative
        .push_text(format!(" (Preference: {})", pref));
    event.preference = Some(pref.clone());

    if let Some(consequence) = correlate(event.date, trigger, schedule) {
        event.narrative.append(consequence.narrative(style));
        event.consequence = Some(consequence);
    }
}

fn push_remarks(narrative: &mut Narrative, remarks: Option<&str>) {
    if let Some(r) = remarks.map(str::trim).filter(|r| !r.is_empty()) {
        narrative.push_text(format!(" {}", r));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
