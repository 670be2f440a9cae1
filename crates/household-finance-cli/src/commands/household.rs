use chrono::{Local, NaiveDate};
use clap::Args;
use serde_json::Value;

use household_finance_core::household::{
    analyze_cash_flow, analyze_spending, evaluate_goals, summarize_balance_sheet,
    BalanceSheetInput, CashFlowInput, MonthlySpending, SavingsGoal,
};

use crate::input;

/// Arguments for the balance sheet summary
#[derive(Args)]
pub struct BalanceSheetArgs {
    /// Path to a JSON/YAML balance sheet (accounts, investments, loans, property)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the cash flow analysis
#[derive(Args)]
pub struct CashFlowArgs {
    /// Path to a JSON/YAML list of income and expense lines
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the spending comparison
#[derive(Args)]
pub struct SpendingArgs {
    /// Path to a JSON/YAML array of monthly spending, most recent month first
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for savings goal progress
#[derive(Args)]
pub struct GoalsArgs {
    /// Path to a JSON/YAML array of savings goals
    #[arg(long)]
    pub input: Option<String>,

    /// Evaluation date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

pub fn run_balance_sheet(args: BalanceSheetArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sheet: BalanceSheetInput = input::require_input(args.input.as_deref(), "balance-sheet")?;
    let result = summarize_balance_sheet(&sheet)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_cash_flow(args: CashFlowArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let flows: CashFlowInput = input::require_input(args.input.as_deref(), "cash-flow")?;
    let result = analyze_cash_flow(&flows)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_spending(args: SpendingArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let history: Vec<MonthlySpending> = input::require_input(args.input.as_deref(), "spending")?;
    let result = analyze_spending(&history)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_goals(args: GoalsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let goals: Vec<SavingsGoal> = input::require_input(args.input.as_deref(), "goals")?;
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let result = evaluate_goals(&goals, as_of)?;
    Ok(serde_json::to_value(result)?)
}
