use household_finance_core::config::DashboardConfig;

use crate::input::file;

/// Load and validate the dashboard config, or the built-in defaults when no
/// path is given.
pub fn load(path: Option<&str>) -> Result<DashboardConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => {
            let config: DashboardConfig = file::read_document(path)?;
            tracing::debug!(path, "loaded dashboard config");
            config
        }
        None => DashboardConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::file::{parse_document, DocumentFormat};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_without_path() {
        assert_eq!(load(None).unwrap(), DashboardConfig::default());
    }

    #[test]
    fn test_yaml_config_overrides() {
        let yaml = r#"
currency:
  symbol: "$"
  decimals: 2
risk_policy:
  low_threshold: 15
  moderate_threshold: 30
growth:
  years: 20
"#;
        let config: DashboardConfig = parse_document(yaml, DocumentFormat::Yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.currency.symbol, "$");
        assert_eq!(config.risk_policy.low_threshold, dec!(15));
        assert_eq!(config.growth.years, 20);
        assert_eq!(config.growth.annual_return_pct, dec!(7));
    }
}
