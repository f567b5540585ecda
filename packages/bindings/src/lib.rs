use napi::Result as NapiResult;
use napi_derive::napi;

use loan_history_core::annual_summary::{self, ChartView};
use loan_history_core::formatting::{CurrencyFormatter, DefaultCurrencyFormatter};
use loan_history_core::timeline;
use loan_history_core::Currency;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

#[napi]
pub fn build_timeline(input_json: String) -> NapiResult<String> {
    let input: timeline::TimelineInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = timeline::build_timeline(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Annual summary chart
// ---------------------------------------------------------------------------

#[napi]
pub fn annual_chart(input_json: String) -> NapiResult<String> {
    let input: annual_summary::AnnualChartInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = annual_summary::annual_chart(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn annual_summary(input_json: String) -> NapiResult<String> {
    let input: annual_summary::AnnualSummaryInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = annual_summary::annual_summary(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Takes the current view (`"normal"` / `"maximized"`) as JSON and returns
/// the transition to apply.
#[napi]
pub fn toggle_chart_view(view_json: String) -> NapiResult<String> {
    let view: ChartView = serde_json::from_str(&view_json).map_err(to_napi_error)?;
    serde_json::to_string(&view.toggle()).map_err(to_napi_error)
}

/// Format an amount (decimal string) for tooltips and axis ticks.
#[napi]
pub fn format_currency(amount: String, currency_code: String) -> NapiResult<String> {
    let amount: loan_history_core::Money = amount.trim().parse().map_err(to_napi_error)?;
    let currency = Currency::from_code(&currency_code).map_err(to_napi_error)?;
    Ok(DefaultCurrencyFormatter.format(amount, &currency))
}
