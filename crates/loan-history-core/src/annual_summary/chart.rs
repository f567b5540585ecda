//! Grouped bar chart configuration for annual repayment totals.
//!
//! Produces a renderer-neutral description (labels, datasets, options) plus
//! currency-formatted tooltip labels; drawing is left to the front end.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::formatting::{CurrencyFormatter, DefaultCurrencyFormatter};
use crate::types::{with_metadata, ComputationOutput, Currency, Money};
use crate::LoanHistoryResult;

use super::aggregate::AnnualSummary;
use super::view::ChartView;

pub const CHART_TITLE: &str = "Annual Loan Summary Overview";

pub const NO_DATA_MESSAGE: &str = "No annual summary data available for chart.";

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// The three compared series, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    PrincipalPaid,
    InterestPaid,
    PrepaymentsMade,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 3] = [
        SeriesKind::PrincipalPaid,
        SeriesKind::InterestPaid,
        SeriesKind::PrepaymentsMade,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SeriesKind::PrincipalPaid => "Total Principal Paid",
            SeriesKind::InterestPaid => "Total Interest Paid (Regular + Pre-EMI)",
            SeriesKind::PrepaymentsMade => "Total Prepayments Made",
        }
    }

    pub fn value(self, summary: &AnnualSummary) -> Money {
        match self {
            SeriesKind::PrincipalPaid => summary.total_principal_paid,
            SeriesKind::InterestPaid => summary.combined_interest(),
            SeriesKind::PrepaymentsMade => summary.total_prepayments_made,
        }
    }

    fn colors(self) -> (&'static str, &'static str) {
        match self {
            SeriesKind::PrincipalPaid => ("rgba(75, 192, 192, 0.6)", "rgba(75, 192, 192, 1)"),
            SeriesKind::InterestPaid => ("rgba(255, 99, 132, 0.6)", "rgba(255, 99, 132, 1)"),
            SeriesKind::PrepaymentsMade => ("rgba(153, 102, 255, 0.6)", "rgba(153, 102, 255, 1)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub kind: SeriesKind,
    pub label: String,
    pub data: Vec<Money>,
    /// Tooltip text per data point, e.g. `Total Principal Paid: ₹1,20,000`.
    pub tooltips: Vec<String>,
    pub background_color: String,
    pub border_color: String,
    pub border_width: u32,
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub title: String,
    pub legend_position: LegendPosition,
    pub stacked: bool,
    pub y_begin_at_zero: bool,
    pub y_axis_title: String,
    pub maintain_aspect_ratio: bool,
}

impl ChartOptions {
    fn for_currency(currency: &Currency) -> Self {
        Self {
            title: CHART_TITLE.to_string(),
            legend_position: LegendPosition::Bottom,
            stacked: false,
            y_begin_at_zero: true,
            y_axis_title: format!("Amount ({})", currency.code()),
            maintain_aspect_ratio: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub options: ChartOptions,
    pub currency: Currency,
    pub view: ChartView,
}

impl ChartConfig {
    /// Tooltip text for a point of the given dataset. `None` when the dataset
    /// index is out of range.
    pub fn tooltip_label(
        &self,
        dataset_index: usize,
        value: Money,
        formatter: &dyn CurrencyFormatter,
    ) -> Option<String> {
        let dataset = self.datasets.get(dataset_index)?;
        Some(tooltip_text(&dataset.label, value, &self.currency, formatter))
    }

    /// Y-axis tick label.
    pub fn axis_tick(&self, value: Money, formatter: &dyn CurrencyFormatter) -> String {
        formatter.format(value, &self.currency)
    }
}

fn tooltip_text(
    label: &str,
    value: Money,
    currency: &Currency,
    formatter: &dyn CurrencyFormatter,
) -> String {
    if label.is_empty() {
        formatter.format(value, currency)
    } else {
        format!("{}: {}", label, formatter.format(value, currency))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AnnualChart {
    NoData { message: String },
    Chart(ChartConfig),
}

impl AnnualChart {
    pub fn datasets(&self) -> &[Dataset] {
        match self {
            AnnualChart::NoData { .. } => &[],
            AnnualChart::Chart(config) => &config.datasets,
        }
    }
}

/// Build the annual comparison chart. Empty input yields the no-data
/// placeholder and no series.
pub fn build_annual_chart(
    summaries: &[AnnualSummary],
    currency: &Currency,
    view: ChartView,
    formatter: &dyn CurrencyFormatter,
) -> AnnualChart {
    if summaries.is_empty() {
        return AnnualChart::NoData {
            message: NO_DATA_MESSAGE.to_string(),
        };
    }

    let labels = summaries.iter().map(|s| s.year_label.clone()).collect();
    let datasets = SeriesKind::ALL
        .iter()
        .map(|&kind| {
            let data: Vec<Money> = summaries.iter().map(|s| kind.value(s)).collect();
            let tooltips = data
                .iter()
                .map(|v| tooltip_text(kind.label(), *v, currency, formatter))
                .collect();
            let (background_color, border_color) = kind.colors();
            Dataset {
                kind,
                label: kind.label().to_string(),
                data,
                tooltips,
                background_color: background_color.to_string(),
                border_color: border_color.to_string(),
                border_width: 1,
            }
        })
        .collect();

    AnnualChart::Chart(ChartConfig {
        labels,
        datasets,
        options: ChartOptions::for_currency(currency),
        currency: currency.clone(),
        view,
    })
}

// ---------------------------------------------------------------------------
// JSON entry point
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualChartInput {
    #[serde(default)]
    pub summaries: Vec<AnnualSummary>,
    /// Currency code for tooltips and the y axis; INR when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default)]
    pub view: ChartView,
}

pub fn annual_chart(input: &AnnualChartInput) -> LoanHistoryResult<ComputationOutput<AnnualChart>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let currency = match input.currency.as_deref() {
        Some(code) => Currency::from_code(code)?,
        None => Currency::default(),
    };

    for s in &input.summaries {
        if s.total_principal_paid.is_sign_negative()
            || s.combined_interest().is_sign_negative()
            || s.total_prepayments_made.is_sign_negative()
        {
            warnings.push(format!("Year {} has negative totals", s.year_label));
        }
    }

    let chart = build_annual_chart(
        &input.summaries,
        &currency,
        input.view,
        &DefaultCurrencyFormatter,
    );
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Annual principal / interest / prepayment comparison",
        input,
        warnings,
        elapsed,
        chart,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn summary(
        year: &str,
        principal: Decimal,
        interest: Decimal,
        pre_emi: Decimal,
    ) -> AnnualSummary {
        AnnualSummary {
            year_label: year.into(),
            total_principal_paid: principal,
            total_interest_paid: interest,
            total_pre_emi_interest_paid: pre_emi,
            total_prepayments_made: Decimal::ZERO,
        }
    }

    #[test]
    fn test_empty_input_is_no_data() {
        let chart = build_annual_chart(
            &[],
            &Currency::INR,
            ChartView::Normal,
            &DefaultCurrencyFormatter,
        );
        assert_eq!(
            chart,
            AnnualChart::NoData {
                message: NO_DATA_MESSAGE.to_string()
            }
        );
        assert!(chart.datasets().is_empty());
    }

    #[test]
    fn test_three_series_keyed_by_year() {
        let summaries = vec![
            summary("2024", dec!(100000), dec!(80000), dec!(5000)),
            summary("2025", dec!(120000), dec!(70000), Decimal::ZERO),
        ];
        let chart = build_annual_chart(
            &summaries,
            &Currency::INR,
            ChartView::Normal,
            &DefaultCurrencyFormatter,
        );
        let AnnualChart::Chart(config) = chart else {
            panic!("Expected chart");
        };
        assert_eq!(config.labels, vec!["2024", "2025"]);
        assert_eq!(config.datasets.len(), 3);
        assert_eq!(config.datasets[0].data, vec![dec!(100000), dec!(120000)]);
        assert_eq!(config.datasets[1].data, vec![dec!(85000), dec!(70000)]);
        assert_eq!(config.datasets[2].data, vec![Decimal::ZERO, Decimal::ZERO]);
        assert_eq!(
            config.datasets[1].tooltips[0],
            "Total Interest Paid (Regular + Pre-EMI): ₹85,000"
        );
        assert_eq!(config.options.y_axis_title, "Amount (INR)");
        assert_eq!(config.options.legend_position, LegendPosition::Bottom);
        assert!(!config.options.stacked);
    }

    #[test]
    fn test_tooltip_and_axis_use_currency() {
        let summaries = vec![summary("FY24", dec!(1500), dec!(250.5), Decimal::ZERO)];
        let chart = build_annual_chart(
            &summaries,
            &Currency::USD,
            ChartView::Normal,
            &DefaultCurrencyFormatter,
        );
        let AnnualChart::Chart(config) = chart else {
            panic!("Expected chart");
        };
        let f = DefaultCurrencyFormatter;
        assert_eq!(
            config.tooltip_label(0, dec!(1500), &f).unwrap(),
            "Total Principal Paid: $1,500"
        );
        assert!(config.tooltip_label(3, dec!(1), &f).is_none());
        assert_eq!(config.axis_tick(dec!(2000000), &f), "$2,000,000");
    }

    #[test]
    fn test_annual_chart_entry_point() {
        let input = AnnualChartInput {
            summaries: vec![summary("2024", dec!(-1), dec!(10), Decimal::ZERO)],
            currency: Some("gbp".into()),
            view: ChartView::Maximized,
        };
        let out = annual_chart(&input).unwrap();
        assert_eq!(out.warnings.len(), 1);
        let json = serde_json::to_value(&out.result).unwrap();
        assert_eq!(json["state"], "chart");
        assert_eq!(json["view"], "maximized");
        assert_eq!(json["options"]["y_axis_title"], "Amount (GBP)");
    }
}
