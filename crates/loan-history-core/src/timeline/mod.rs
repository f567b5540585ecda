//! Loan lifecycle timeline.
//!
//! Merges the loan's start terms, disbursements, prepayments, rate changes and
//! custom EMI changes (plus payoff, when the schedule shows one) into a single
//! date-ordered narrative. Prepayments and rate changes that carry an
//! adjustment preference are correlated against the amortization schedule to
//! report the new EMI or the projected remaining tenure.

pub mod assemble;
pub mod correlate;
pub mod event;
pub mod harvest;
pub mod narrative;

pub use assemble::{
    assemble_timeline, build_timeline, build_timeline_with, render_timeline, RenderedEvent,
    RenderedTimeline, Timeline, TimelineBody, TimelineInput,
};
pub use correlate::{correlate, find_entry_on_or_after, CorrelationTrigger};
pub use event::{Consequence, EventKind, EventSource, TimelineEvent};
pub use harvest::harvest_events;
pub use narrative::{AmountStyle, Narrative, Segment};
