//! Timeline assembly and rendering.

use std::time::Instant;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::formatting::{format_event_date, CurrencyFormatter, DefaultCurrencyFormatter};
use crate::loan::{first_out_of_order, AmortizationEntry, Loan};
use crate::types::{with_metadata, ComputationOutput, Currency};
use crate::LoanHistoryResult;

use super::event::{Consequence, EventKind, TimelineEvent};
use super::harvest::harvest_events;
use super::narrative::{AmountStyle, Segment};

pub const TIMELINE_HEADING: &str = "Loan Event History";

pub const NO_SIGNIFICANT_EVENTS: &str =
    "No significant events recorded beyond loan initiation terms.";

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// A merged, date-ordered loan timeline.
#[derive(Debug, Clone)]
pub enum Timeline<'a> {
    /// Nothing happened beyond the origination terms.
    NoSignificantEvents { loan_start: TimelineEvent<'a> },
    Events(Vec<TimelineEvent<'a>>),
}

impl<'a> Timeline<'a> {
    pub fn events(&self) -> &[TimelineEvent<'a>] {
        match self {
            Timeline::NoSignificantEvents { loan_start } => std::slice::from_ref(loan_start),
            Timeline::Events(events) => events,
        }
    }

    pub fn is_empty_state(&self) -> bool {
        matches!(self, Timeline::NoSignificantEvents { .. })
    }
}

/// Harvest, correlate and order all events of `loan`.
///
/// Events are stably sorted by date, so same-day events keep their category
/// order (start, disbursement, prepayment, rate change, custom EMI, end).
pub fn assemble_timeline<'a>(
    loan: &'a Loan,
    schedule: &'a [AmortizationEntry],
    style: &AmountStyle<'_>,
) -> Timeline<'a> {
    let mut events = harvest_events(loan, schedule, style);
    events.sort_by_key(|e| e.date);

    if events.len() == 1 && !events[0].has_initial_disbursement() {
        if let Some(loan_start) = events.pop() {
            return Timeline::NoSignificantEvents { loan_start };
        }
    }
    Timeline::Events(events)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedEvent {
    pub date: NaiveDate,
    /// e.g. `15 Jun 2024`
    pub date_label: String,
    pub kind: EventKind,
    pub kind_label: String,
    pub icon: String,
    pub segments: Vec<Segment>,
    /// Narrative without markup.
    pub text: String,
    /// Icon followed by the escaped narrative, emphasis as `<span>`.
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consequence: Option<Consequence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TimelineBody {
    Empty { message: String },
    Events { items: Vec<RenderedEvent> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedTimeline {
    pub heading: String,
    #[serde(flatten)]
    pub body: TimelineBody,
}

impl RenderedTimeline {
    pub fn items(&self) -> &[RenderedEvent] {
        match &self.body {
            TimelineBody::Empty { .. } => &[],
            TimelineBody::Events { items } => items,
        }
    }
}

pub fn render_event(event: &TimelineEvent<'_>) -> RenderedEvent {
    RenderedEvent {
        date: event.date,
        date_label: format_event_date(event.date),
        kind: event.kind,
        kind_label: event.kind.label().to_string(),
        icon: event.icon().to_string(),
        segments: event.narrative.segments().to_vec(),
        text: event.narrative.to_plain_text(),
        html: format!("{} {}", event.icon(), event.narrative.to_html()),
        consequence: event.consequence.clone(),
    }
}

pub fn render_timeline(timeline: &Timeline<'_>) -> RenderedTimeline {
    let body = match timeline {
        Timeline::NoSignificantEvents { .. } => TimelineBody::Empty {
            message: NO_SIGNIFICANT_EVENTS.to_string(),
        },
        Timeline::Events(events) => TimelineBody::Events {
            items: events.iter().map(render_event).collect(),
        },
    };
    RenderedTimeline {
        heading: TIMELINE_HEADING.to_string(),
        body,
    }
}

// ---------------------------------------------------------------------------
// JSON entry point
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineInput {
    pub loan: Loan,
    #[serde(default)]
    pub schedule: Vec<AmortizationEntry>,
    /// Currency code for amounts in narratives; INR when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// Build and render the loan timeline with the default currency formatter.
pub fn build_timeline(
    input: &TimelineInput,
) -> LoanHistoryResult<ComputationOutput<RenderedTimeline>> {
    build_timeline_with(input, &DefaultCurrencyFormatter)
}

pub fn build_timeline_with(
    input: &TimelineInput,
    formatter: &dyn CurrencyFormatter,
) -> LoanHistoryResult<ComputationOutput<RenderedTimeline>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let currency = match input.currency.as_deref() {
        Some(code) => Currency::from_code(code)?,
        None => Currency::default(),
    };

    if let Some(idx) = first_out_of_order(&input.schedule) {
        warnings.push(format!(
            "Schedule is not in ascending payment-date order at entry {} (month {}); \
             correlated EMI and tenure figures may be misleading",
            idx, input.schedule[idx].month_number
        ));
    }

    let style = AmountStyle::new(formatter, &currency);
    let timeline = assemble_timeline(&input.loan, &input.schedule, &style);

    for event in timeline.events() {
        if event.preference.is_some() && event.consequence.is_none() {
            warnings.push(format!(
                "{} on {} falls after the last scheduled payment; no projected effect",
                event.kind.label(),
                event.date
            ));
        }
    }

    let rendered = render_timeline(&timeline);
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan event timeline with schedule correlation",
        input,
        warnings,
        elapsed,
        rendered,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::{Disbursement, EmiChange, LoanDetails};
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn loan() -> Loan {
        Loan {
            details: LoanDetails {
                start_date: d(2024, 1, 1),
                original_interest_rate: dec!(8.5),
                original_tenure_months: 120,
                disbursements: vec![],
            },
            payment_history: None,
            interest_rate_changes: None,
            custom_emi_changes: None,
        }
    }

    fn style_inr() -> (DefaultCurrencyFormatter, Currency) {
        (DefaultCurrencyFormatter, Currency::INR)
    }

    #[test]
    fn test_bare_loan_renders_empty_state() {
        let loan = loan();
        let (f, c) = style_inr();
        let timeline = assemble_timeline(&loan, &[], &AmountStyle::new(&f, &c));
        assert!(timeline.is_empty_state());
        assert_eq!(timeline.events().len(), 1);

        let rendered = render_timeline(&timeline);
        assert_eq!(rendered.heading, TIMELINE_HEADING);
        assert_eq!(
            rendered.body,
            TimelineBody::Empty {
                message: NO_SIGNIFICANT_EVENTS.to_string()
            }
        );
        assert!(rendered.items().is_empty());
    }

    #[test]
    fn test_merged_initial_disbursement_is_not_empty_state() {
        let mut loan = loan();
        loan.details.disbursements = vec![Disbursement {
            date: d(2024, 1, 1),
            amount: dec!(1000000),
            remarks: Some("Initial Disbursement".into()),
        }];
        let (f, c) = style_inr();
        let timeline = assemble_timeline(&loan, &[], &AmountStyle::new(&f, &c));
        assert!(!timeline.is_empty_state());
        assert_eq!(timeline.events().len(), 1);
    }

    #[test]
    fn test_same_day_events_keep_category_order() {
        let mut loan = loan();
        loan.custom_emi_changes = Some(vec![EmiChange {
            date: d(2024, 3, 1),
            new_emi: dec!(15000),
            remarks: None,
        }]);
        loan.details.disbursements = vec![Disbursement {
            date: d(2024, 3, 1),
            amount: dec!(200000),
            remarks: None,
        }];
        let (f, c) = style_inr();
        let timeline = assemble_timeline(&loan, &[], &AmountStyle::new(&f, &c));
        let kinds: Vec<EventKind> = timeline.events().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::LoanStart,
                EventKind::Disbursement,
                EventKind::CustomEmi
            ]
        );
    }

    #[test]
    fn test_render_event_html_and_date_label() {
        let mut loan = loan();
        loan.custom_emi_changes = Some(vec![EmiChange {
            date: d(2024, 6, 15),
            new_emi: dec!(15000),
            remarks: Some("<script>x</script>".into()),
        }]);
        let (f, c) = style_inr();
        let timeline = assemble_timeline(&loan, &[], &AmountStyle::new(&f, &c));
        let rendered = render_timeline(&timeline);
        let item = &rendered.items()[1];
        assert_eq!(item.date_label, "15 Jun 2024");
        assert_eq!(item.kind_label, "Custom EMI");
        assert_eq!(
            item.html,
            "⚙️ EMI set to <span>₹15,000</span>. &lt;script&gt;x&lt;/script&gt;"
        );
        assert_eq!(item.text, "EMI set to ₹15,000. <script>x</script>");
    }

    #[test]
    fn test_build_timeline_rejects_bad_currency() {
        let input = TimelineInput {
            loan: loan(),
            schedule: vec![],
            currency: Some("".into()),
        };
        assert!(build_timeline(&input).is_err());
    }

    #[test]
    fn test_build_timeline_serializes_state_tag() {
        let input = TimelineInput {
            loan: loan(),
            schedule: vec![],
            currency: None,
        };
        let out = build_timeline(&input).unwrap();
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["result"]["state"], "empty");
        assert_eq!(json["result"]["heading"], TIMELINE_HEADING);
        assert!(out.warnings.is_empty());
    }
}
