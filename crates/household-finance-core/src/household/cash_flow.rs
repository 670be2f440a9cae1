use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::DomainError;
use crate::time_value::{checked, checked_sum, percent_of};
use crate::types::*;
use crate::DomainResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeLine {
    pub source: String,
    pub amount: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseLine {
    pub category: String,
    pub amount: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowInput {
    pub income: Vec<IncomeLine>,
    pub expenses: Vec<ExpenseLine>,
    /// Total monthly debt service (new loan payment plus other loans).
    #[serde(default)]
    pub loan_payments: Money,
}

/// How a waterfall bar is drawn: from zero, as a step, or as a running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterfallMeasure {
    Absolute,
    Relative,
    Total,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterfallStep {
    pub label: String,
    pub amount: Money,
    pub measure: WaterfallMeasure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseShare {
    pub category: String,
    pub amount: Money,
    pub share_pct: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowOutput {
    pub total_income: Money,
    pub total_expenses: Money,
    pub loan_payments: Money,
    pub monthly_cash_flow: Money,
    /// Monthly cash flow as a percentage of total income.
    pub savings_rate: Percent,
    pub expense_shares: Vec<ExpenseShare>,
    pub waterfall: Vec<WaterfallStep>,
}

/// Monthly budget: what comes in, what goes out and what is left.
pub fn analyze_cash_flow(
    input: &CashFlowInput,
) -> DomainResult<ComputationOutput<CashFlowOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.income.iter().any(|i| i.amount < Decimal::ZERO) {
        return Err(DomainError::invalid("income", "Income amounts cannot be negative."));
    }
    if input.expenses.iter().any(|e| e.amount < Decimal::ZERO) {
        return Err(DomainError::invalid("expenses", "Expense amounts cannot be negative."));
    }
    if input.loan_payments < Decimal::ZERO {
        return Err(DomainError::invalid("loan_payments", "Loan payments cannot be negative."));
    }

    let total_income = checked_sum(input.income.iter().map(|i| i.amount), "total income")?;
    let total_expenses =
        checked_sum(input.expenses.iter().map(|e| e.amount), "total expenses")?;
    let monthly_cash_flow = checked(
        total_income
            .checked_sub(total_expenses)
            .and_then(|v| v.checked_sub(input.loan_payments)),
        "monthly cash flow",
    )?;
    let savings_rate =
        percent_of(monthly_cash_flow, total_income, "monthly_cash_flow / total_income")?;

    if monthly_cash_flow < Decimal::ZERO {
        warnings.push("Monthly cash flow is negative; spending exceeds income.".into());
    }

    let expense_shares = if total_expenses.is_zero() {
        Vec::new()
    } else {
        input
            .expenses
            .iter()
            .map(|e| {
                Ok(ExpenseShare {
                    category: e.category.clone(),
                    amount: e.amount,
                    share_pct: percent_of(e.amount, total_expenses, "expense share")?,
                })
            })
            .collect::<DomainResult<Vec<_>>>()?
    };

    let mut waterfall = Vec::with_capacity(input.expenses.len() + 3);
    waterfall.push(WaterfallStep {
        label: "Total Income".into(),
        amount: total_income,
        measure: WaterfallMeasure::Absolute,
    });
    for e in &input.expenses {
        waterfall.push(WaterfallStep {
            label: e.category.clone(),
            amount: -e.amount,
            measure: WaterfallMeasure::Relative,
        });
    }
    waterfall.push(WaterfallStep {
        label: "Loan Payments".into(),
        amount: -input.loan_payments,
        measure: WaterfallMeasure::Relative,
    });
    waterfall.push(WaterfallStep {
        label: "Remaining".into(),
        amount: monthly_cash_flow,
        measure: WaterfallMeasure::Total,
    });

    let output = CashFlowOutput {
        total_income,
        total_expenses,
        loan_payments: input.loan_payments,
        monthly_cash_flow,
        savings_rate,
        expense_shares,
        waterfall,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "monthly_cash_flow": "income - expenses - loan_payments",
        "savings_rate": "monthly_cash_flow / income * 100",
    });

    Ok(with_metadata(
        "Monthly cash flow and savings rate",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}
