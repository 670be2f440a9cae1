use chrono::NaiveDate;
use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use household_finance_core::config::DashboardConfig;
use household_finance_core::dashboard::HouseholdData;
use household_finance_core::metrics::{FinancialProfile, RiskPolicy};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse<T: serde::de::DeserializeOwned>(input_json: &str) -> NapiResult<T> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

fn render(output: &impl serde::Serialize) -> NapiResult<String> {
    serde_json::to_string(output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PaymentRequest {
    principal: Decimal,
    annual_rate_pct: Decimal,
    term_years: u32,
}

#[derive(Deserialize)]
struct RiskRequest {
    debt_to_income: Decimal,
    loan_to_value: Decimal,
    disposable_income_ratio: Decimal,
    asset_to_loan_ratio: Decimal,
    #[serde(default)]
    policy: RiskPolicy,
}

#[derive(Deserialize)]
struct SnapshotRequest {
    profile: FinancialProfile,
    #[serde(default)]
    policy: RiskPolicy,
}

#[napi]
pub fn monthly_payment(input_json: String) -> NapiResult<String> {
    let req: PaymentRequest = parse(&input_json)?;
    let payment = household_finance_core::metrics::compute_monthly_payment(
        req.principal,
        req.annual_rate_pct,
        req.term_years,
    )
    .map_err(to_napi_error)?;
    render(&payment)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let req: PaymentRequest = parse(&input_json)?;
    let schedule = household_finance_core::metrics::payment::amortization_schedule(
        req.principal,
        req.annual_rate_pct,
        req.term_years,
    )
    .map_err(to_napi_error)?;
    render(&schedule)
}

#[napi]
pub fn loan_ratios(input_json: String) -> NapiResult<String> {
    let profile: FinancialProfile = parse(&input_json)?;
    let payment = household_finance_core::metrics::compute_monthly_payment(
        profile.loan_amount,
        profile.interest_rate,
        profile.loan_term,
    )
    .map_err(to_napi_error)?;
    let ratios = household_finance_core::metrics::compute_ratios(&profile, payment)
        .map_err(to_napi_error)?;
    render(&ratios)
}

#[napi]
pub fn classify_risk(input_json: String) -> NapiResult<String> {
    let req: RiskRequest = parse(&input_json)?;
    let assessment = household_finance_core::metrics::classify_risk(
        req.debt_to_income,
        req.loan_to_value,
        req.disposable_income_ratio,
        req.asset_to_loan_ratio,
        &req.policy,
    )
    .map_err(to_napi_error)?;
    render(&assessment)
}

/// Accepts either `{ "profile": {...}, "policy": {...} }` or a bare profile.
#[napi]
pub fn metrics_snapshot(input_json: String) -> NapiResult<String> {
    let req = match serde_json::from_str::<SnapshotRequest>(&input_json) {
        Ok(req) => req,
        Err(_) => SnapshotRequest {
            profile: parse(&input_json)?,
            policy: RiskPolicy::default(),
        },
    };
    let output = household_finance_core::metrics::compute_snapshot(&req.profile, &req.policy)
        .map_err(to_napi_error)?;
    render(&output)
}

// ---------------------------------------------------------------------------
// Growth
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct GrowthRequest {
    monthly_contribution: Decimal,
    annual_rate_pct: Decimal,
    years: u32,
}

#[napi]
pub fn compound_growth(input_json: String) -> NapiResult<String> {
    let req: GrowthRequest = parse(&input_json)?;
    let projection = household_finance_core::growth::project_compound_growth(
        req.monthly_contribution,
        req.annual_rate_pct,
        req.years,
    )
    .map_err(to_napi_error)?;
    render(&projection.points())
}

#[napi]
pub fn compare_savings_habits(input_json: String) -> NapiResult<String> {
    let input: household_finance_core::growth::HabitComparisonInput = parse(&input_json)?;
    let output =
        household_finance_core::growth::compare_savings_habits(&input).map_err(to_napi_error)?;
    render(&output)
}

// ---------------------------------------------------------------------------
// Household
// ---------------------------------------------------------------------------

#[napi]
pub fn balance_sheet(input_json: String) -> NapiResult<String> {
    let input: household_finance_core::household::BalanceSheetInput = parse(&input_json)?;
    let output = household_finance_core::household::summarize_balance_sheet(&input)
        .map_err(to_napi_error)?;
    render(&output)
}

#[napi]
pub fn cash_flow(input_json: String) -> NapiResult<String> {
    let input: household_finance_core::household::CashFlowInput = parse(&input_json)?;
    let output =
        household_finance_core::household::analyze_cash_flow(&input).map_err(to_napi_error)?;
    render(&output)
}

#[napi]
pub fn spending_analysis(input_json: String) -> NapiResult<String> {
    let history: Vec<household_finance_core::household::MonthlySpending> = parse(&input_json)?;
    let output =
        household_finance_core::household::analyze_spending(&history).map_err(to_napi_error)?;
    render(&output)
}

#[derive(Deserialize)]
struct GoalsRequest {
    goals: Vec<household_finance_core::household::SavingsGoal>,
    as_of: NaiveDate,
}

#[napi]
pub fn goal_progress(input_json: String) -> NapiResult<String> {
    let req: GoalsRequest = parse(&input_json)?;
    let output = household_finance_core::household::evaluate_goals(&req.goals, req.as_of)
        .map_err(to_napi_error)?;
    render(&output)
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct DashboardRequest {
    #[serde(default)]
    config: DashboardConfig,
    /// Falls back to the demo household.
    #[serde(default)]
    household: Option<HouseholdData>,
    as_of: NaiveDate,
}

#[napi]
pub fn build_dashboard(input_json: String) -> NapiResult<String> {
    let req: DashboardRequest = parse(&input_json)?;
    let household = req
        .household
        .unwrap_or_else(household_finance_core::dashboard::sample::sample_household);
    let report =
        household_finance_core::dashboard::build_dashboard(&req.config, &household, req.as_of)
            .map_err(to_napi_error)?;
    render(&report)
}

#[napi]
pub fn default_config() -> NapiResult<String> {
    render(&DashboardConfig::default())
}
