//! Normal / maximized presentation state for the annual chart.
//!
//! Toggling never touches chart data. It returns what the presentation layer
//! has to do: optionally scroll to the top, then re-measure the chart after a
//! short delay.

use serde::{Deserialize, Serialize};

/// Delay before the chart is re-measured after a view change.
pub const RELAYOUT_DELAY_MS: u64 = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartView {
    #[default]
    Normal,
    Maximized,
}

/// Deferred resize request. Idempotent; safe to fire after a later render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayoutRequest {
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewTransition {
    pub view: ChartView,
    pub scroll_to_top: bool,
    pub relayout: RelayoutRequest,
}

impl ChartView {
    pub fn is_maximized(self) -> bool {
        self == ChartView::Maximized
    }

    /// Label for the toggle control in this state.
    pub fn control_label(self) -> &'static str {
        match self {
            ChartView::Normal => "Maximize",
            ChartView::Maximized => "Exit Maximize",
        }
    }

    pub fn toggle(self) -> ViewTransition {
        let view = match self {
            ChartView::Normal => ChartView::Maximized,
            ChartView::Maximized => ChartView::Normal,
        };
        ViewTransition {
            view,
            scroll_to_top: view.is_maximized(),
            relayout: RelayoutRequest {
                delay_ms: RELAYOUT_DELAY_MS,
            },
        }
    }
}
