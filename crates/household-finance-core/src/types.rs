use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Percentages expressed in points (3.5 = 3.5%), as the dashboard shows them.
pub type Percent = Decimal;

/// Plain fractions (0.2 = 20%).
pub type Fraction = Decimal;

/// How monetary amounts are rendered for display. The dashboard uses a
/// single fixed symbol; there is no conversion between currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub symbol: String,
    #[serde(default)]
    pub decimals: u32,
    #[serde(default = "default_separator")]
    pub thousands_separator: String,
}

fn default_separator() -> String {
    ",".to_string()
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "€".to_string(),
            decimals: 0,
            thousands_separator: default_separator(),
        }
    }
}

impl CurrencyFormat {
    /// Format an amount as `€1,402` (or `-€352` for negative amounts).
    pub fn format(&self, amount: Money) -> String {
        let rounded =
            amount.round_dp_with_strategy(self.decimals, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let text = rounded.abs().to_string();
        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, f)) => (i.to_string(), Some(f.to_string())),
            None => (text, None),
        };

        let mut grouped = String::new();
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push_str(&self.thousands_separator);
            }
            grouped.push(ch);
        }

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&self.symbol);
        out.push_str(&grouped);
        if self.decimals > 0 {
            let mut frac = frac_part.unwrap_or_default();
            while frac.len() < self.decimals as usize {
                frac.push('0');
            }
            out.push('.');
            out.push_str(&frac);
        }
        out
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    for warning in &warnings {
        tracing::warn!(methodology, "{warning}");
    }
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_thousands() {
        let fmt = CurrencyFormat::default();
        assert_eq!(fmt.format(dec!(1401.75)), "€1,402");
        assert_eq!(fmt.format(dec!(280000)), "€280,000");
        assert_eq!(fmt.format(dec!(999)), "€999");
    }

    #[test]
    fn test_format_negative_and_decimals() {
        let fmt = CurrencyFormat {
            symbol: "$".into(),
            decimals: 2,
            thousands_separator: ",".into(),
        };
        assert_eq!(fmt.format(dec!(-107700.5)), "-$107,700.50");
        assert_eq!(fmt.format(dec!(0)), "$0.00");
    }

    #[test]
    fn test_format_rounds_half_away_from_zero() {
        let fmt = CurrencyFormat::default();
        assert_eq!(fmt.format(dec!(697.5)), "€698");
        assert_eq!(fmt.format(dec!(-0.4)), "€0");
    }
}
