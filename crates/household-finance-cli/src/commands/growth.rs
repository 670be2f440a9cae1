use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use household_finance_core::config::DashboardConfig;
use household_finance_core::growth::{
    compare_savings_habits, project_compound_growth, HabitComparisonInput, SavingsHabit,
};

use crate::input;

/// Arguments for a compound growth projection
#[derive(Args)]
pub struct GrowthArgs {
    /// Amount saved every month
    #[arg(long)]
    pub monthly: Decimal,

    /// Annual return in percent (defaults to the configured return)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Number of years (defaults to the configured horizon)
    #[arg(long)]
    pub years: Option<u32>,
}

/// Arguments for the savings habit comparison
#[derive(Args)]
pub struct HabitsArgs {
    /// A habit as NAME=MONTHLY_AMOUNT, e.g. "Daily coffee=88" (repeatable)
    #[arg(long = "habit", value_parser = parse_habit)]
    pub habits: Vec<SavingsHabit>,

    /// Annual return in percent (defaults to the configured return)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Number of years (defaults to the configured horizon)
    #[arg(long)]
    pub years: Option<u32>,

    /// Path to a JSON/YAML habit comparison input (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

fn parse_habit(raw: &str) -> Result<SavingsHabit, String> {
    let (name, amount) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=AMOUNT, got '{raw}'"))?;
    let monthly_amount = amount
        .trim()
        .parse::<Decimal>()
        .map_err(|e| format!("invalid amount '{amount}': {e}"))?;
    Ok(SavingsHabit {
        name: name.trim().to_string(),
        monthly_amount,
    })
}

pub fn run_growth(
    args: GrowthArgs,
    config: &DashboardConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let projection = project_compound_growth(
        args.monthly,
        args.rate.unwrap_or(config.growth.annual_return_pct),
        args.years.unwrap_or(config.growth.years),
    )?;

    Ok(serde_json::json!({
        "monthly_contribution": projection.monthly_contribution(),
        "annual_rate_pct": projection.annual_rate_pct(),
        "years": projection.years(),
        "final_value": projection.final_value(),
        "points": projection.points(),
    }))
}

pub fn run_habits(
    args: HabitsArgs,
    config: &DashboardConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let comparison = match input::read_input::<HabitComparisonInput>(args.input.as_deref())? {
        Some(comparison) => comparison,
        None => {
            if args.habits.is_empty() {
                return Err(
                    "at least one --habit NAME=AMOUNT is required (or provide --input)".into(),
                );
            }
            HabitComparisonInput {
                habits: args.habits,
                annual_rate_pct: args.rate.unwrap_or(config.growth.annual_return_pct),
                years: args.years.unwrap_or(config.growth.years),
            }
        }
    };

    let result = compare_savings_habits(&comparison)?;
    Ok(serde_json::to_value(result)?)
}
