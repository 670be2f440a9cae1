use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::metrics::{FinancialProfile, RiskPolicy};
use crate::time_value::MAX_GROWTH_YEARS;
use crate::types::{CurrencyFormat, Percent};
use crate::DomainResult;

/// Defaults for the savings-growth panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthDefaults {
    pub annual_return_pct: Percent,
    pub years: u32,
}

impl Default for GrowthDefaults {
    fn default() -> Self {
        Self {
            annual_return_pct: dec!(7),
            years: 30,
        }
    }
}

/// Everything a dashboard render needs besides the household's own data.
/// Every section is optional in a config file and falls back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub currency: CurrencyFormat,
    pub risk_policy: RiskPolicy,
    pub default_profile: FinancialProfile,
    pub growth: GrowthDefaults,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            currency: CurrencyFormat::default(),
            risk_policy: RiskPolicy::default(),
            default_profile: default_profile(),
            growth: GrowthDefaults::default(),
        }
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> DomainResult<()> {
        self.risk_policy.validate()?;
        self.default_profile.validate()?;
        if self.growth.annual_return_pct < Decimal::ZERO {
            return Err(DomainError::invalid(
                "growth.annual_return_pct",
                "Annual return cannot be negative.",
            ));
        }
        if self.growth.years == 0 || self.growth.years > MAX_GROWTH_YEARS {
            return Err(DomainError::invalid(
                "growth.years",
                format!("Projection horizon must be between 1 and {MAX_GROWTH_YEARS} years."),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> DomainResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

/// The profile the dashboard opens with before the user edits anything.
pub fn default_profile() -> FinancialProfile {
    FinancialProfile {
        monthly_income: dec!(3500),
        monthly_expenses: dec!(1200),
        other_loans: dec!(200),
        loan_amount: dec!(280000),
        down_payment: dec!(70000),
        loan_term: 25,
        interest_rate: dec!(3.5),
        other_assets: dec!(25000),
        existing_debt_balances: Decimal::ZERO,
        maintenance_fee: None,
        renovation_cost: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_is_valid() {
        assert!(DashboardConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config = DashboardConfig::from_json_str(
            r#"{ "risk_policy": { "low_threshold": "25" }, "currency": { "symbol": "$" } }"#,
        )
        .unwrap();
        assert_eq!(config.risk_policy.low_threshold, dec!(25));
        assert_eq!(config.risk_policy.moderate_threshold, dec!(35));
        assert_eq!(config.currency.symbol, "$");
        assert_eq!(config.currency.thousands_separator, ",");
        assert_eq!(config.default_profile, default_profile());
        assert_eq!(config.growth, GrowthDefaults::default());
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let err = DashboardConfig::from_json_str(r#"{ "risk_policy": { "low_threshold": "50" } }"#)
            .unwrap_err();
        match err {
            DomainError::InvalidInput { field, .. } => {
                assert_eq!(field, "risk_policy.low_threshold")
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_growth_horizon_bounds() {
        let ok = format!(r#"{{ "growth": {{ "years": {MAX_GROWTH_YEARS} }} }}"#);
        assert!(DashboardConfig::from_json_str(&ok).is_ok());

        let err = DashboardConfig::from_json_str(r#"{ "growth": { "years": 4000000000 } }"#)
            .unwrap_err();
        match err {
            DomainError::InvalidInput { field, .. } => assert_eq!(field, "growth.years"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_long_default_loan_term_rejected() {
        let err = DashboardConfig::from_json_str(
            r#"{ "default_profile": {
                "monthly_income": "3500", "monthly_expenses": "1200", "other_loans": "200",
                "loan_amount": "280000", "down_payment": "70000",
                "loan_term": 300000000, "interest_rate": "3.5" } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput { .. }));
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = DashboardConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, DomainError::SerializationError(_)));
    }
}
