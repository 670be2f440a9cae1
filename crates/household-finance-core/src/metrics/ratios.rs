use serde::{Deserialize, Serialize};

use crate::metrics::profile::FinancialProfile;
use crate::time_value::{checked, checked_sum, percent_of, safe_divide};
use crate::types::{Fraction, Money, Percent};
use crate::DomainResult;

/// Affordability ratios for a profile at a given monthly loan payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRatios {
    /// Loan / (loan + down payment), percent.
    pub loan_to_value: Percent,
    /// (Payment + other loans) / income, percent.
    pub debt_to_income: Percent,
    /// Payment / income, percent.
    pub payment_to_income: Percent,
    /// (Payment + maintenance + renovation) / income, percent.
    pub housing_cost_ratio: Percent,
    /// Income left after expenses and all debt service.
    pub disposable_income: Money,
    /// Disposable income / income, as a fraction.
    pub disposable_income_ratio: Fraction,
    /// Other assets / loan, percent.
    pub asset_to_loan_ratio: Percent,
}

/// Derive the affordability ratios. Fails on an invalid profile or a zero
/// loan amount (the asset-to-loan ratio is undefined).
pub fn compute_ratios(profile: &FinancialProfile, payment: Money) -> DomainResult<LoanRatios> {
    profile.validate()?;

    let income = profile.monthly_income;
    let debt_service = checked_sum([payment, profile.other_loans], "payment + other_loans")?;

    let loan_to_value = percent_of(
        profile.loan_amount,
        profile.property_value()?,
        "loan_amount / (loan_amount + down_payment)",
    )?;
    let debt_to_income = percent_of(debt_service, income, "debt service / monthly_income")?;
    let payment_to_income = percent_of(payment, income, "payment / monthly_income")?;
    let housing_cost_ratio = percent_of(
        checked_sum(
            [payment, profile.recurring_housing_costs()?],
            "payment + housing costs",
        )?,
        income,
        "housing costs / monthly_income",
    )?;

    let disposable_income = checked(
        income
            .checked_sub(profile.monthly_expenses)
            .and_then(|v| v.checked_sub(debt_service)),
        "disposable income",
    )?;
    let disposable_income_ratio =
        safe_divide(disposable_income, income, "disposable_income / monthly_income")?;

    let asset_to_loan_ratio =
        percent_of(profile.other_assets, profile.loan_amount, "other_assets / loan_amount")?;

    Ok(LoanRatios {
        loan_to_value,
        debt_to_income,
        payment_to_income,
        housing_cost_ratio,
        disposable_income,
        disposable_income_ratio,
        asset_to_loan_ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn profile() -> FinancialProfile {
        FinancialProfile {
            monthly_income: dec!(4000),
            monthly_expenses: dec!(1000),
            other_loans: dec!(200),
            loan_amount: dec!(200000),
            down_payment: dec!(50000),
            loan_term: 20,
            interest_rate: dec!(4),
            other_assets: dec!(20000),
            existing_debt_balances: Decimal::ZERO,
            maintenance_fee: Some(dec!(150)),
            renovation_cost: Some(dec!(50)),
        }
    }

    #[test]
    fn test_ratios_with_round_payment() {
        let r = compute_ratios(&profile(), dec!(1000)).unwrap();
        assert_eq!(r.loan_to_value, dec!(80));
        // (1000 + 200) / 4000 = 30%
        assert_eq!(r.debt_to_income, dec!(30));
        assert_eq!(r.payment_to_income, dec!(25));
        // (1000 + 150 + 50) / 4000 = 30%
        assert_eq!(r.housing_cost_ratio, dec!(30));
        // 4000 - 1000 - 1000 - 200
        assert_eq!(r.disposable_income, dec!(1800));
        assert_eq!(r.disposable_income_ratio, dec!(0.45));
        assert_eq!(r.asset_to_loan_ratio, dec!(10));
    }

    #[test]
    fn test_zero_loan_amount_fails() {
        let mut p = profile();
        p.loan_amount = Decimal::ZERO;
        match compute_ratios(&p, Decimal::ZERO).unwrap_err() {
            DomainError::DivisionByZero { context } => assert!(context.contains("other_assets")),
            other => panic!("Expected DivisionByZero, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_income_fails() {
        let mut p = profile();
        p.monthly_income = Decimal::ZERO;
        assert!(compute_ratios(&p, dec!(1000)).is_err());
    }

    #[test]
    fn test_negative_disposable_income_allowed() {
        let r = compute_ratios(&profile(), dec!(3500)).unwrap();
        assert_eq!(r.disposable_income, dec!(-700));
        assert!(r.disposable_income_ratio < Decimal::ZERO);
    }

    #[test]
    fn test_huge_assets_on_tiny_loan_is_overflow() {
        let mut p = profile();
        p.loan_amount = dec!(1);
        p.other_assets = Decimal::MAX;
        match compute_ratios(&p, dec!(1)).unwrap_err() {
            DomainError::Overflow { context } => assert_eq!(context, "other_assets / loan_amount"),
            other => panic!("Expected Overflow, got {other:?}"),
        }
    }

    #[test]
    fn test_huge_debt_service_is_overflow() {
        let mut p = profile();
        p.other_loans = Decimal::MAX;
        assert!(matches!(
            compute_ratios(&p, dec!(1000)).unwrap_err(),
            DomainError::Overflow { .. }
        ));
    }
}
