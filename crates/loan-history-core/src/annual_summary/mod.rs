//! Annual repayment summaries and their bar-chart comparison.

pub mod aggregate;
pub mod chart;
pub mod view;

pub use aggregate::{annual_summary, summarize_by_year, AnnualSummary, AnnualSummaryInput};
pub use chart::{
    annual_chart, build_annual_chart, AnnualChart, AnnualChartInput, ChartConfig, ChartOptions,
    Dataset, LegendPosition, SeriesKind,
};
pub use view::{ChartView, RelayoutRequest, ViewTransition};
