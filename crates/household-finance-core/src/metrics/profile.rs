use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::time_value::{checked, checked_sum};
use crate::types::{Money, Percent};
use crate::DomainResult;

/// Upper bound on the annual interest rate. Keeps monthly compounding over
/// long terms inside the decimal range.
pub const MAX_INTEREST_RATE_PCT: Decimal = dec!(100);

/// Longest loan term accepted, in years. Bounds the monthly compounding
/// loop and the size of an amortization schedule.
pub const MAX_LOAN_TERM_YEARS: u32 = 100;

/// A household's monthly finances plus the parameters of the loan under
/// consideration. Monthly figures are per month; balances are totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub monthly_income: Money,
    pub monthly_expenses: Money,
    /// Monthly debt service on loans other than the one being assessed.
    pub other_loans: Money,
    pub loan_amount: Money,
    pub down_payment: Money,
    /// Loan term in years.
    pub loan_term: u32,
    /// Annual interest rate in percent (3.5 = 3.5%).
    pub interest_rate: Percent,
    #[serde(default)]
    pub other_assets: Money,
    #[serde(default)]
    pub existing_debt_balances: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_fee: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renovation_cost: Option<Money>,
}

impl FinancialProfile {
    /// Check every invariant, failing on the first violation.
    pub fn validate(&self) -> DomainResult<()> {
        if self.monthly_income <= Decimal::ZERO {
            return Err(DomainError::invalid(
                "monthly_income",
                "Monthly income must be positive.",
            ));
        }
        if self.loan_term == 0 {
            return Err(DomainError::invalid("loan_term", "Loan term must be positive."));
        }
        if self.loan_term > MAX_LOAN_TERM_YEARS {
            return Err(DomainError::invalid(
                "loan_term",
                format!("Loan term cannot exceed {MAX_LOAN_TERM_YEARS} years."),
            ));
        }
        if self.interest_rate < Decimal::ZERO {
            return Err(DomainError::invalid(
                "interest_rate",
                "Interest rate cannot be negative.",
            ));
        }
        if self.interest_rate > MAX_INTEREST_RATE_PCT {
            return Err(DomainError::invalid(
                "interest_rate",
                format!("Interest rate cannot exceed {MAX_INTEREST_RATE_PCT}%."),
            ));
        }

        let currency_fields = [
            ("monthly_expenses", Some(self.monthly_expenses)),
            ("other_loans", Some(self.other_loans)),
            ("loan_amount", Some(self.loan_amount)),
            ("down_payment", Some(self.down_payment)),
            ("other_assets", Some(self.other_assets)),
            ("existing_debt_balances", Some(self.existing_debt_balances)),
            ("maintenance_fee", self.maintenance_fee),
            ("renovation_cost", self.renovation_cost),
        ];
        for (field, value) in currency_fields {
            if let Some(v) = value {
                if v < Decimal::ZERO {
                    return Err(DomainError::invalid(field, "Amount cannot be negative."));
                }
            }
        }
        Ok(())
    }

    /// Purchase price implied by the loan plus the down payment.
    pub fn property_value(&self) -> DomainResult<Money> {
        checked(
            self.loan_amount.checked_add(self.down_payment),
            "loan_amount + down_payment",
        )
    }

    /// Recurring monthly housing costs on top of the loan payment.
    pub fn recurring_housing_costs(&self) -> DomainResult<Money> {
        checked_sum(
            [self.maintenance_fee, self.renovation_cost].into_iter().flatten(),
            "maintenance_fee + renovation_cost",
        )
    }
}
