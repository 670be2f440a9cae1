use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::metrics::payment::compute_monthly_payment;
use crate::metrics::profile::FinancialProfile;
use crate::metrics::ratios::compute_ratios;
use crate::metrics::risk::{classify_risk, RiskAssessment, RiskPolicy};
use crate::time_value::checked_sum;
use crate::types::*;
use crate::DomainResult;

/// Debt-to-income above which lenders commonly decline (qualified-mortgage limit).
const DTI_WARNING: Decimal = dec!(43);
const LTV_WARNING: Decimal = dec!(90);

/// Everything the dashboard shows about loan affordability, derived fresh
/// from one profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub monthly_payment: Money,
    pub total_monthly_debt_service: Money,
    pub payment_to_income: Percent,
    pub loan_to_value: Percent,
    pub debt_to_income: Percent,
    pub housing_cost_ratio: Percent,
    pub disposable_income: Money,
    pub disposable_income_ratio: Fraction,
    pub asset_to_loan_ratio: Percent,
    pub property_value: Money,
    pub total_debt: Money,
    pub risk: RiskAssessment,
}

/// Compute the full metrics snapshot for `profile`.
pub fn compute_snapshot(
    profile: &FinancialProfile,
    policy: &RiskPolicy,
) -> DomainResult<ComputationOutput<MetricsSnapshot>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    profile.validate()?;

    let monthly_payment =
        compute_monthly_payment(profile.loan_amount, profile.interest_rate, profile.loan_term)?;
    let ratios = compute_ratios(profile, monthly_payment)?;
    let risk = classify_risk(
        ratios.debt_to_income,
        ratios.loan_to_value,
        ratios.disposable_income_ratio,
        ratios.asset_to_loan_ratio,
        policy,
    )?;

    if ratios.disposable_income < Decimal::ZERO {
        warnings.push(format!(
            "Disposable income is negative ({}); the loan is not affordable on current cash flow.",
            ratios.disposable_income.round_dp(2)
        ));
    }
    if ratios.debt_to_income > DTI_WARNING {
        warnings.push(format!(
            "Debt-to-income of {}% exceeds the {DTI_WARNING}% lending guideline.",
            ratios.debt_to_income.round_dp(1)
        ));
    }
    if ratios.loan_to_value > LTV_WARNING {
        warnings.push(format!(
            "Loan-to-value of {}% exceeds {LTV_WARNING}%.",
            ratios.loan_to_value.round_dp(1)
        ));
    }

    let snapshot = MetricsSnapshot {
        monthly_payment,
        total_monthly_debt_service: checked_sum(
            [monthly_payment, profile.other_loans],
            "total monthly debt service",
        )?,
        payment_to_income: ratios.payment_to_income,
        loan_to_value: ratios.loan_to_value,
        debt_to_income: ratios.debt_to_income,
        housing_cost_ratio: ratios.housing_cost_ratio,
        disposable_income: ratios.disposable_income,
        disposable_income_ratio: ratios.disposable_income_ratio,
        asset_to_loan_ratio: ratios.asset_to_loan_ratio,
        property_value: profile.property_value()?,
        total_debt: checked_sum(
            [profile.loan_amount, profile.existing_debt_balances],
            "total debt",
        )?,
        risk,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "compounding": "monthly",
        "property_value": "loan_amount + down_payment",
        "risk_policy": policy,
    });

    Ok(with_metadata(
        "Fixed-rate amortization with affordability ratios and weighted risk score",
        &assumptions,
        warnings,
        elapsed,
        snapshot,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::risk::RiskCategory;
    use rust_decimal_macros::dec;

    fn reference_profile() -> FinancialProfile {
        FinancialProfile {
            monthly_income: dec!(3500),
            monthly_expenses: dec!(1200),
            other_loans: dec!(200),
            loan_amount: dec!(280000),
            down_payment: dec!(70000),
            loan_term: 25,
            interest_rate: dec!(3.5),
            other_assets: dec!(25000),
            existing_debt_balances: dec!(9500),
            maintenance_fee: None,
            renovation_cost: None,
        }
    }

    #[test]
    fn test_reference_snapshot() {
        let out = compute_snapshot(&reference_profile(), &RiskPolicy::default()).unwrap();
        let s = &out.result;

        assert!((s.monthly_payment - dec!(1401.75)).abs() < dec!(0.01));
        assert_eq!(s.loan_to_value, dec!(80));
        assert!((s.debt_to_income - dec!(45.8)).abs() < dec!(0.05));
        assert!((s.disposable_income - dec!(698.25)).abs() < dec!(0.01));
        assert_eq!(s.property_value, dec!(350000));
        assert_eq!(s.total_debt, dec!(289500));
        assert_eq!(s.total_monthly_debt_service, s.monthly_payment + dec!(200));
        // 0.4*45.76 + 0.4*80 - 20*0.1995 - 0.1*8.93 ≈ 45.42
        assert_eq!(s.risk.category, RiskCategory::High);
    }

    #[test]
    fn test_dti_warning_raised() {
        let out = compute_snapshot(&reference_profile(), &RiskPolicy::default()).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("Debt-to-income")));
        assert!(!out.warnings.iter().any(|w| w.contains("Disposable income")));
    }

    #[test]
    fn test_invalid_profile_propagates() {
        let mut p = reference_profile();
        p.monthly_income = Decimal::ZERO;
        assert!(compute_snapshot(&p, &RiskPolicy::default()).is_err());
    }

    #[test]
    fn test_metadata_populated() {
        let out = compute_snapshot(&reference_profile(), &RiskPolicy::default()).unwrap();
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
        assert!(!out.methodology.is_empty());
    }

    #[test]
    fn test_extreme_assets_report_overflow() {
        let mut p = reference_profile();
        p.loan_amount = dec!(1);
        p.other_assets = Decimal::MAX;
        let err = compute_snapshot(&p, &RiskPolicy::default()).unwrap_err();
        assert!(matches!(err, crate::DomainError::Overflow { .. }));
    }
}
