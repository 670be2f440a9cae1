use household_finance_core::CurrencyFormat;
use rust_decimal::Decimal;
use serde_json::Value;

use super::{scalar_text, unwrap_result};

/// Key answers in priority order. The first one present wins.
const PRIORITY_KEYS: [&str; 8] = [
    "monthly_payment",
    "category",
    "final_value",
    "net_worth",
    "monthly_cash_flow",
    "change_vs_previous_pct",
    "progress_pct",
    "score",
];

/// Fields rendered with the currency symbol.
const MONEY_KEYS: [&str; 4] = ["monthly_payment", "final_value", "net_worth", "monthly_cash_flow"];

/// Render just the key answer of a command's output.
///
/// A dashboard report prints its headlines one per line; anything else
/// prints the highest-priority field of its result, falling back to the
/// first field.
pub fn render_minimal(value: &Value, currency: &CurrencyFormat) -> String {
    if let Some(Value::Array(headlines)) = value.get("headlines") {
        return headlines
            .iter()
            .filter_map(|h| {
                let label = h.get("label")?.as_str()?;
                let text = h.get("value")?.as_str()?;
                Some(format!("{label}: {text}"))
            })
            .collect::<Vec<_>>()
            .join("\n");
    }

    let result = match unwrap_result(value) {
        // Goal lists and similar: answer for the first row.
        Value::Array(rows) => match rows.first() {
            Some(first) => first,
            None => return String::new(),
        },
        other => other,
    };

    let Value::Object(map) = result else {
        return scalar_text(result, "null");
    };

    for key in PRIORITY_KEYS {
        match map.get(key) {
            Some(Value::Null) | None => continue,
            Some(val) => return render_field(key, val, currency),
        }
    }

    match map.iter().next() {
        Some((key, val)) => format!("{key}: {}", scalar_text(val, "null")),
        None => String::new(),
    }
}

fn render_field(key: &str, value: &Value, currency: &CurrencyFormat) -> String {
    if MONEY_KEYS.contains(&key) {
        if let Some(amount) = value.as_str().and_then(|s| s.parse::<Decimal>().ok()) {
            return currency.format(amount);
        }
    }
    scalar_text(value, "null")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_money_uses_currency() {
        let value = json!({
            "result": {"risk": {"category": "High Risk"}, "monthly_payment": "1401.75"}
        });
        assert_eq!(render_minimal(&value, &CurrencyFormat::default()), "€1,402");
    }

    #[test]
    fn test_risk_category() {
        let value = json!({"category": "Moderate Risk", "score": "27.5"});
        assert_eq!(render_minimal(&value, &CurrencyFormat::default()), "Moderate Risk");
    }

    #[test]
    fn test_headlines() {
        let value = json!({
            "headlines": [
                {"label": "Monthly Payment", "value": "€1,402"},
                {"label": "Risk", "value": "High Risk"}
            ]
        });
        assert_eq!(
            render_minimal(&value, &CurrencyFormat::default()),
            "Monthly Payment: €1,402\nRisk: High Risk"
        );
    }

    #[test]
    fn test_fallback_to_first_field() {
        let value = json!({"result": {"as_of": "2025-03-01"}});
        assert_eq!(render_minimal(&value, &CurrencyFormat::default()), "as_of: 2025-03-01");
    }
}
