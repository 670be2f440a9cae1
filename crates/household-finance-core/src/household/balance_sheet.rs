use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::DomainError;
use crate::time_value::{checked, checked_sum, safe_divide};
use crate::types::*;
use crate::DomainResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Checking,
    Savings,
    Investment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub balance: Money,
    pub kind: AccountKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    pub name: String,
    pub balance: Money,
    /// Trailing annual growth, percent.
    pub growth_pct: Percent,
}

/// A non-mortgage loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub name: String,
    pub balance: Money,
    pub rate_pct: Percent,
    pub monthly_payment: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub market_value: Money,
    pub mortgage_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetInput {
    pub accounts: Vec<Account>,
    pub investments: Vec<Investment>,
    pub loans: Vec<Loan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<Property>,
    #[serde(default)]
    pub other_assets: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetOutput {
    pub cash_and_savings: Money,
    pub investments: Money,
    pub property_value: Money,
    pub property_equity: Money,
    pub other_assets: Money,
    /// Property counts at market value; the mortgage sits in liabilities.
    pub total_assets: Money,
    pub mortgage: Money,
    pub other_loans: Money,
    pub total_liabilities: Money,
    pub net_worth: Money,
    /// Balance-weighted growth across investments; `None` with no invested balance.
    pub weighted_investment_growth_pct: Option<Percent>,
    pub monthly_loan_payments: Money,
    /// Loan carrying the highest rate, the first candidate for paydown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest_rate_loan: Option<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Summarize a household's assets, liabilities and net worth.
pub fn summarize_balance_sheet(
    input: &BalanceSheetInput,
) -> DomainResult<ComputationOutput<BalanceSheetOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let cash_and_savings = checked_sum(input.accounts.iter().map(|a| a.balance), "accounts")?;
    let investments = checked_sum(input.investments.iter().map(|i| i.balance), "investments")?;

    let (property_value, mortgage) = match &input.property {
        Some(p) => (p.market_value, p.mortgage_balance),
        None => (Decimal::ZERO, Decimal::ZERO),
    };
    let property_equity = property_value - mortgage;
    if property_equity < Decimal::ZERO {
        warnings.push("Mortgage balance exceeds property value (negative equity).".into());
    }

    let other_loans = checked_sum(input.loans.iter().map(|l| l.balance), "loan balances")?;
    let total_assets = checked_sum(
        [cash_and_savings, investments, property_value, input.other_assets],
        "total assets",
    )?;
    let total_liabilities = checked_sum([mortgage, other_loans], "total liabilities")?;
    let net_worth = total_assets - total_liabilities;

    let weighted_investment_growth_pct = if investments.is_zero() {
        None
    } else {
        let weighted = input.investments.iter().try_fold(Decimal::ZERO, |acc, i| {
            checked(
                i.balance.checked_mul(i.growth_pct).and_then(|w| acc.checked_add(w)),
                "balance-weighted investment growth",
            )
        })?;
        Some(safe_divide(weighted, investments, "weighted growth / investments")?)
    };

    let monthly_loan_payments = checked_sum(
        input.loans.iter().map(|l| l.monthly_payment),
        "monthly loan payments",
    )?;
    let highest_rate_loan = input
        .loans
        .iter()
        .filter(|l| l.balance > Decimal::ZERO)
        .max_by(|a, b| a.rate_pct.cmp(&b.rate_pct))
        .map(|l| l.name.clone());

    if net_worth < Decimal::ZERO {
        warnings.push("Net worth is negative.".into());
    }

    let output = BalanceSheetOutput {
        cash_and_savings,
        investments,
        property_value,
        property_equity,
        other_assets: input.other_assets,
        total_assets,
        mortgage,
        other_loans,
        total_liabilities,
        net_worth,
        weighted_investment_growth_pct,
        monthly_loan_payments,
        highest_rate_loan,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "property_in_assets": "market_value",
        "property_equity": "market_value - mortgage_balance",
        "total_liabilities": "mortgage_balance + other loan balances",
    });

    Ok(with_metadata(
        "Household balance sheet",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

fn validate_input(input: &BalanceSheetInput) -> DomainResult<()> {
    for account in &input.accounts {
        if account.balance < Decimal::ZERO {
            return Err(DomainError::invalid(
                &format!("accounts.{}", account.name),
                "Account balance cannot be negative.",
            ));
        }
    }
    for investment in &input.investments {
        if investment.balance < Decimal::ZERO {
            return Err(DomainError::invalid(
                &format!("investments.{}", investment.name),
                "Investment balance cannot be negative.",
            ));
        }
    }
    for loan in &input.loans {
        if loan.balance < Decimal::ZERO || loan.monthly_payment < Decimal::ZERO {
            return Err(DomainError::invalid(
                &format!("loans.{}", loan.name),
                "Loan balance and payment cannot be negative.",
            ));
        }
    }
    if let Some(p) = &input.property {
        if p.market_value < Decimal::ZERO || p.mortgage_balance < Decimal::ZERO {
            return Err(DomainError::invalid(
                "property",
                "Property value and mortgage balance cannot be negative.",
            ));
        }
    }
    if input.other_assets < Decimal::ZERO {
        return Err(DomainError::invalid("other_assets", "Amount cannot be negative."));
    }
    Ok(())
}
