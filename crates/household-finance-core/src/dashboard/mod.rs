pub mod sample;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::DashboardConfig;
use crate::growth::{compare_savings_habits, HabitComparisonInput, SavingsHabit};
use crate::growth::habits::HabitComparisonOutput;
use crate::household::balance_sheet::{Account, BalanceSheetOutput, Investment, Loan, Property};
use crate::household::cash_flow::{CashFlowOutput, ExpenseLine, IncomeLine};
use crate::household::goals::GoalProgress;
use crate::household::spending::SpendingAnalysis;
use crate::household::{
    analyze_cash_flow, analyze_spending, evaluate_goals, select_recommendations,
    summarize_balance_sheet, BalanceSheetInput, CashFlowInput, MonthlySpending, Recommendation,
    RecommendationCategory, SavingsGoal,
};
use crate::metrics::{compute_snapshot, FinancialProfile, MetricsSnapshot};
use crate::types::ComputationOutput;
use crate::DomainResult;

/// Number of investment/savings insights shown next to the portfolio.
const INVESTMENT_INSIGHTS: usize = 2;

/// Everything the household has told the dashboard. The mortgage and the
/// other-asset total come from `profile`; `loans` holds only the others.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdData {
    /// Falls back to the config's default profile when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<FinancialProfile>,
    pub accounts: Vec<Account>,
    pub investments: Vec<Investment>,
    pub loans: Vec<Loan>,
    pub income: Vec<IncomeLine>,
    pub expenses: Vec<ExpenseLine>,
    pub spending_history: Vec<MonthlySpending>,
    pub goals: Vec<SavingsGoal>,
    #[serde(default)]
    pub habits: Vec<SavingsHabit>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

/// A key figure already formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    pub label: String,
    pub value: String,
}

/// The data behind one render of the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub as_of: NaiveDate,
    pub headlines: Vec<Headline>,
    pub metrics: ComputationOutput<MetricsSnapshot>,
    pub balance_sheet: ComputationOutput<BalanceSheetOutput>,
    pub cash_flow: ComputationOutput<CashFlowOutput>,
    pub spending: ComputationOutput<SpendingAnalysis>,
    pub goals: ComputationOutput<Vec<GoalProgress>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_habits: Option<ComputationOutput<HabitComparisonOutput>>,
    pub investment_insights: Vec<Recommendation>,
}

/// Compute every panel of the dashboard from scratch.
pub fn build_dashboard(
    config: &DashboardConfig,
    household: &HouseholdData,
    as_of: NaiveDate,
) -> DomainResult<DashboardReport> {
    config.validate()?;
    let profile = household.profile.as_ref().unwrap_or(&config.default_profile);

    let metrics = compute_snapshot(profile, &config.risk_policy)?;

    let balance_sheet = summarize_balance_sheet(&BalanceSheetInput {
        accounts: household.accounts.clone(),
        investments: household.investments.clone(),
        loans: household.loans.clone(),
        property: Some(Property {
            market_value: profile.property_value()?,
            mortgage_balance: profile.loan_amount,
        }),
        other_assets: profile.other_assets,
    })?;

    let cash_flow = analyze_cash_flow(&CashFlowInput {
        income: household.income.clone(),
        expenses: household.expenses.clone(),
        loan_payments: metrics.result.total_monthly_debt_service,
    })?;

    let spending = analyze_spending(&household.spending_history)?;
    let goals = evaluate_goals(&household.goals, as_of)?;

    let savings_habits = if household.habits.is_empty() {
        None
    } else {
        Some(compare_savings_habits(&HabitComparisonInput {
            habits: household.habits.clone(),
            annual_rate_pct: config.growth.annual_return_pct,
            years: config.growth.years,
        })?)
    };

    let investment_insights = select_recommendations(
        &household.recommendations,
        &[RecommendationCategory::Investment, RecommendationCategory::Savings],
        INVESTMENT_INSIGHTS,
    );

    let currency = &config.currency;
    let headlines = vec![
        headline("Monthly Payment", currency.format(metrics.result.monthly_payment)),
        headline(
            "Payment to Income",
            format!("{}%", metrics.result.payment_to_income.round_dp(1)),
        ),
        headline(
            "Total Debt Ratio",
            format!("{}%", metrics.result.debt_to_income.round_dp(1)),
        ),
        headline("Disposable Income", currency.format(metrics.result.disposable_income)),
        headline("Net Worth", currency.format(balance_sheet.result.net_worth)),
        headline(
            "Savings Rate",
            format!("{}%", cash_flow.result.savings_rate.round_dp(1)),
        ),
        headline("Risk Level", metrics.result.risk.category.to_string()),
    ];

    tracing::debug!(%as_of, panels = 6, "dashboard assembled");

    Ok(DashboardReport {
        as_of,
        headlines,
        metrics,
        balance_sheet,
        cash_flow,
        spending,
        goals,
        savings_habits,
        investment_insights,
    })
}

fn headline(label: &str, value: String) -> Headline {
    Headline {
        label: label.to_string(),
        value,
    }
}
