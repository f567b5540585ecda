use clap::Args;
use serde_json::Value;

use loan_history_core::annual_summary::{self, AnnualChartInput, AnnualSummaryInput};

use crate::input;

#[derive(Args)]
pub struct AnnualChartArgs {
    /// JSON file with `summaries`, optional `currency` and `view`
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Args)]
pub struct AnnualSummaryArgs {
    /// JSON file with an amortization `schedule`
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_annual_chart(
    args: AnnualChartArgs,
    default_currency: &str,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut chart_input: AnnualChartInput = input::load(args.input.as_deref(), "annual chart")?;
    if chart_input.currency.is_none() {
        chart_input.currency = Some(default_currency.to_string());
    }
    let result = annual_summary::annual_chart(&chart_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_annual_summary(args: AnnualSummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let summary_input: AnnualSummaryInput =
        input::load(args.input.as_deref(), "annual summary")?;
    let result = annual_summary::annual_summary(&summary_input)?;
    Ok(serde_json::to_value(result)?)
}
