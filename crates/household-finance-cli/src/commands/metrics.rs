use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use household_finance_core::config::DashboardConfig;
use household_finance_core::metrics::payment::{amortization_schedule, AmortizationYear};
use household_finance_core::metrics::{
    classify_risk, compute_monthly_payment, compute_snapshot, FinancialProfile,
};
use household_finance_core::types::{Money, Percent};

use crate::input;

/// Arguments for the affordability snapshot
#[derive(Args)]
pub struct MetricsArgs {
    /// Net monthly household income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Monthly living expenses
    #[arg(long)]
    pub expenses: Option<Decimal>,

    /// Monthly payments on other loans
    #[arg(long)]
    pub other_loans: Option<Decimal>,

    /// Amount borrowed
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Down payment
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub term: Option<u32>,

    /// Annual interest rate in percent (3.5 for 3.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Savings and other assets
    #[arg(long)]
    pub other_assets: Option<Decimal>,

    /// Path to a JSON/YAML profile (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the monthly payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    /// Amount borrowed
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Decimal,

    /// Loan term in years
    #[arg(long)]
    pub term: u32,

    /// Include the yearly amortization schedule
    #[arg(long)]
    pub schedule: bool,
}

/// Arguments for scoring precomputed ratios
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RiskArgs {
    /// Debt-to-income in percent
    #[arg(long)]
    pub dti: Decimal,

    /// Loan-to-value in percent
    #[arg(long)]
    pub ltv: Decimal,

    /// Disposable income as a fraction of income (0.2 for 20%)
    #[arg(long)]
    pub disposable_ratio: Decimal,

    /// Other assets as a percent of the loan
    #[arg(long)]
    pub asset_to_loan: Decimal,
}

#[derive(Serialize)]
struct PaymentOutput {
    principal: Money,
    annual_rate_pct: Percent,
    term_years: u32,
    monthly_payment: Money,
    total_paid: Money,
    total_interest: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule: Option<Vec<AmortizationYear>>,
}

pub fn run_metrics(
    args: MetricsArgs,
    config: &DashboardConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let profile = match input::read_input::<FinancialProfile>(args.input.as_deref())? {
        Some(profile) => profile,
        None => {
            let base = &config.default_profile;
            FinancialProfile {
                monthly_income: args.income.unwrap_or(base.monthly_income),
                monthly_expenses: args.expenses.unwrap_or(base.monthly_expenses),
                other_loans: args.other_loans.unwrap_or(base.other_loans),
                loan_amount: args.loan_amount.unwrap_or(base.loan_amount),
                down_payment: args.down_payment.unwrap_or(base.down_payment),
                loan_term: args.term.unwrap_or(base.loan_term),
                interest_rate: args.rate.unwrap_or(base.interest_rate),
                other_assets: args.other_assets.unwrap_or(base.other_assets),
                ..base.clone()
            }
        }
    };

    let result = compute_snapshot(&profile, &config.risk_policy)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let monthly_payment = compute_monthly_payment(args.principal, args.rate, args.term)?;
    let months = Decimal::from(args.term) * Decimal::from(12u32);
    let total_paid = monthly_payment
        .checked_mul(months)
        .ok_or("total paid over the term is outside the decimal range")?
        .round_dp(2);

    let schedule = if args.schedule {
        Some(amortization_schedule(args.principal, args.rate, args.term)?)
    } else {
        None
    };

    let output = PaymentOutput {
        principal: args.principal,
        annual_rate_pct: args.rate,
        term_years: args.term,
        monthly_payment: monthly_payment.round_dp(2),
        total_paid,
        total_interest: total_paid - args.principal,
        schedule,
    };
    Ok(serde_json::to_value(output)?)
}

pub fn run_risk(
    args: RiskArgs,
    config: &DashboardConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let assessment = classify_risk(
        args.dti,
        args.ltv,
        args.disposable_ratio,
        args.asset_to_loan,
        &config.risk_policy,
    )?;
    Ok(serde_json::to_value(assessment)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn payment_args(principal: Decimal, rate: Decimal, term: u32) -> PaymentArgs {
        PaymentArgs {
            principal,
            rate,
            term,
            schedule: false,
        }
    }

    #[test]
    fn test_payment_totals() {
        let value = run_payment(payment_args(dec!(24000), Decimal::ZERO, 2)).unwrap();
        assert_eq!(value["monthly_payment"], "1000");
        assert_eq!(value["total_interest"], "0");
    }

    #[test]
    fn test_payment_out_of_range_is_error() {
        let err = run_payment(payment_args(Decimal::MAX, dec!(100), 1)).unwrap_err();
        assert!(err.to_string().contains("decimal range"));
    }

    #[test]
    fn test_payment_term_capped() {
        let err = run_payment(payment_args(dec!(1000), Decimal::ZERO, 300_000_000)).unwrap_err();
        assert!(err.to_string().contains("term_years"));
    }
}
