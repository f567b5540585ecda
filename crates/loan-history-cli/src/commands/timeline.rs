use clap::Args;
use serde_json::Value;
use tracing::debug;

use loan_history_core::timeline::{self, TimelineInput};

use crate::input;

#[derive(Args)]
pub struct TimelineArgs {
    /// JSON file with `loan`, `schedule` and optional `currency`
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_timeline(
    args: TimelineArgs,
    default_currency: &str,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut tl_input: TimelineInput = input::load(args.input.as_deref(), "loan timeline")?;
    if tl_input.currency.is_none() {
        tl_input.currency = Some(default_currency.to_string());
    }
    debug!(
        schedule_len = tl_input.schedule.len(),
        currency = ?tl_input.currency,
        "building loan timeline"
    );
    let result = timeline::build_timeline(&tl_input)?;
    Ok(serde_json::to_value(result)?)
}
