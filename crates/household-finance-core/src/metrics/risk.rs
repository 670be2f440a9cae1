use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::time_value::checked;
use crate::types::{Fraction, Percent};
use crate::DomainResult;

/// Affordability risk bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "High Risk")]
    High,
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "Low Risk",
            Self::Moderate => "Moderate Risk",
            Self::High => "High Risk",
        };
        write!(f, "{}", s)
    }
}

/// Weights and thresholds of the risk score. The score is the weighted sum
/// of the four inputs, so liquidity measures carry negative weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskPolicy {
    pub debt_to_income_weight: Decimal,
    pub loan_to_value_weight: Decimal,
    pub disposable_income_ratio_weight: Decimal,
    pub asset_to_loan_ratio_weight: Decimal,
    /// Scores strictly below this are low risk.
    pub low_threshold: Decimal,
    /// Scores strictly below this (and at or above `low_threshold`) are moderate.
    pub moderate_threshold: Decimal,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            debt_to_income_weight: dec!(0.4),
            loan_to_value_weight: dec!(0.4),
            disposable_income_ratio_weight: dec!(-20),
            asset_to_loan_ratio_weight: dec!(-0.1),
            low_threshold: dec!(20),
            moderate_threshold: dec!(35),
        }
    }
}

impl RiskPolicy {
    pub fn validate(&self) -> DomainResult<()> {
        if self.low_threshold >= self.moderate_threshold {
            return Err(DomainError::invalid(
                "risk_policy.low_threshold",
                format!(
                    "Low threshold {} must be below moderate threshold {}.",
                    self.low_threshold, self.moderate_threshold
                ),
            ));
        }
        Ok(())
    }

    fn score(
        &self,
        debt_to_income: Percent,
        loan_to_value: Percent,
        disposable_income_ratio: Fraction,
        asset_to_loan_ratio: Percent,
    ) -> DomainResult<Decimal> {
        let terms = [
            (self.debt_to_income_weight, debt_to_income),
            (self.loan_to_value_weight, loan_to_value),
            (self.disposable_income_ratio_weight, disposable_income_ratio),
            (self.asset_to_loan_ratio_weight, asset_to_loan_ratio),
        ];
        terms.iter().try_fold(Decimal::ZERO, |acc, (weight, value)| {
            checked(
                weight.checked_mul(*value).and_then(|t| acc.checked_add(t)),
                "risk score",
            )
        })
    }

    fn bucket(&self, score: Decimal) -> RiskCategory {
        if score < self.low_threshold {
            RiskCategory::Low
        } else if score < self.moderate_threshold {
            RiskCategory::Moderate
        } else {
            RiskCategory::High
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub category: RiskCategory,
    pub score: Decimal,
}

/// Score and bucket affordability risk under `policy`.
///
/// `debt_to_income`, `loan_to_value` and `asset_to_loan_ratio` are percent;
/// `disposable_income_ratio` is a fraction of income.
pub fn classify_risk(
    debt_to_income: Percent,
    loan_to_value: Percent,
    disposable_income_ratio: Fraction,
    asset_to_loan_ratio: Percent,
    policy: &RiskPolicy,
) -> DomainResult<RiskAssessment> {
    policy.validate()?;

    let score = policy.score(
        debt_to_income,
        loan_to_value,
        disposable_income_ratio,
        asset_to_loan_ratio,
    )?;
    let category = policy.bucket(score);

    tracing::debug!(%score, %category, "risk classified");
    Ok(RiskAssessment { category, score })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn classify(dti: Decimal, ltv: Decimal, disp: Decimal, atl: Decimal) -> RiskAssessment {
        classify_risk(dti, ltv, disp, atl, &RiskPolicy::default()).unwrap()
    }

    #[test]
    fn test_low_threshold_boundary() {
        // 0.4 * 50 = 20 exactly: not below 20
        let at = classify(dec!(50), Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(at.score, dec!(20));
        assert_eq!(at.category, RiskCategory::Moderate);

        let below = classify(dec!(49.99), Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(below.category, RiskCategory::Low);
    }

    #[test]
    fn test_moderate_threshold_boundary() {
        // 0.4 * 87.5 = 35 exactly
        let at = classify(Decimal::ZERO, dec!(87.5), Decimal::ZERO, Decimal::ZERO);
        assert_eq!(at.score, dec!(35));
        assert_eq!(at.category, RiskCategory::High);

        let below = classify(Decimal::ZERO, dec!(87.49), Decimal::ZERO, Decimal::ZERO);
        assert_eq!(below.category, RiskCategory::Moderate);
    }

    #[test]
    fn test_liquidity_lowers_score() {
        let a = classify(dec!(30), dec!(80), Decimal::ZERO, Decimal::ZERO);
        let b = classify(dec!(30), dec!(80), dec!(0.5), dec!(50));
        // 12 + 32 = 44; 44 - 10 - 5 = 29
        assert_eq!(a.score, dec!(44));
        assert_eq!(b.score, dec!(29));
        assert_eq!(b.category, RiskCategory::Moderate);
    }

    #[test]
    fn test_custom_policy() {
        let policy = RiskPolicy {
            low_threshold: dec!(50),
            moderate_threshold: dec!(60),
            ..RiskPolicy::default()
        };
        let r = classify_risk(dec!(30), dec!(80), Decimal::ZERO, Decimal::ZERO, &policy).unwrap();
        assert_eq!(r.category, RiskCategory::Low);
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let policy = RiskPolicy {
            low_threshold: dec!(40),
            moderate_threshold: dec!(35),
            ..RiskPolicy::default()
        };
        assert!(classify_risk(dec!(1), dec!(1), dec!(0), dec!(0), &policy).is_err());
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&RiskCategory::Moderate).unwrap();
        assert_eq!(json, "\"Moderate Risk\"");
        assert_eq!(RiskCategory::High.to_string(), "High Risk");
    }

    #[test]
    fn test_score_out_of_range_is_error() {
        let err = classify_risk(
            Decimal::MAX,
            Decimal::MAX,
            Decimal::ZERO,
            Decimal::ZERO,
            &RiskPolicy::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Overflow { .. }));
    }
}
