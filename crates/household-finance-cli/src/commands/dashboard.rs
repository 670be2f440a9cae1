use chrono::{Local, NaiveDate};
use clap::Args;
use serde_json::Value;

use household_finance_core::config::DashboardConfig;
use household_finance_core::dashboard::sample::sample_household;
use household_finance_core::dashboard::{build_dashboard, HouseholdData};

use crate::input;

/// Arguments for the full dashboard
#[derive(Args)]
pub struct DashboardArgs {
    /// Path to a JSON/YAML household (defaults to the built-in demo household)
    #[arg(long)]
    pub input: Option<String>,

    /// Evaluation date for goals, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

pub fn run_dashboard(
    args: DashboardArgs,
    config: &DashboardConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let household: HouseholdData = match input::read_input(args.input.as_deref())? {
        Some(household) => household,
        None => {
            tracing::debug!("no household given, using the demo household");
            sample_household()
        }
    };
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());

    let report = build_dashboard(config, &household, as_of)?;
    Ok(serde_json::to_value(report)?)
}
