use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::error::DomainError;
use crate::time_value::{checked_sum, percent_of, safe_divide};
use crate::types::*;
use crate::DomainResult;

/// One month of spending by category. Serializes flat, e.g.
/// `{"month": "Mar", "Housing": 1200, "Food": 480}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySpending {
    pub month: String,
    #[serde(flatten)]
    pub categories: BTreeMap<String, Money>,
}

impl MonthlySpending {
    pub fn total(&self) -> DomainResult<Money> {
        checked_sum(self.categories.values().copied(), "monthly spending total")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Money,
    pub share_pct: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryChange {
    pub category: String,
    pub current: Money,
    pub previous: Money,
    pub change: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthTotal {
    pub month: String,
    pub total: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingAnalysis {
    pub current_month: String,
    pub current_total: Money,
    pub previous_total: Money,
    pub average_total: Money,
    pub change_vs_previous_pct: Percent,
    pub change_vs_average_pct: Percent,
    pub category_breakdown: Vec<CategoryShare>,
    /// Largest absolute movers first.
    pub category_changes: Vec<CategoryChange>,
    /// Oldest month first, for trend charts.
    pub monthly_totals: Vec<MonthTotal>,
}

/// Compare the latest month's spending with the previous month and with
/// the period average. `history` is ordered most recent month first.
pub fn analyze_spending(
    history: &[MonthlySpending],
) -> DomainResult<ComputationOutput<SpendingAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if history.len() < 2 {
        return Err(DomainError::InsufficientData(
            "Spending analysis requires at least 2 months of history".into(),
        ));
    }
    for month in history {
        if let Some((category, _)) = month.categories.iter().find(|(_, v)| **v < Decimal::ZERO) {
            return Err(DomainError::invalid(
                &format!("{}.{}", month.month, category),
                "Spending cannot be negative.",
            ));
        }
    }

    let current = &history[0];
    let previous = &history[1];
    let totals = history
        .iter()
        .map(MonthlySpending::total)
        .collect::<DomainResult<Vec<_>>>()?;
    let current_total = totals[0];
    let previous_total = totals[1];
    let average_total = safe_divide(
        checked_sum(totals.iter().copied(), "spending period total")?,
        Decimal::from(history.len()),
        "spending period average",
    )?;

    let change_vs_previous_pct = percent_of(
        current_total - previous_total,
        previous_total,
        "previous month spending total",
    )?;
    let change_vs_average_pct = percent_of(
        current_total - average_total,
        average_total,
        "average monthly spending total",
    )?;

    let category_breakdown = if current_total.is_zero() {
        Vec::new()
    } else {
        current
            .categories
            .iter()
            .map(|(category, amount)| {
                Ok(CategoryShare {
                    category: category.clone(),
                    amount: *amount,
                    share_pct: percent_of(*amount, current_total, "category share")?,
                })
            })
            .collect::<DomainResult<Vec<_>>>()?
    };

    let mut category_changes: Vec<CategoryChange> = current
        .categories
        .keys()
        .chain(previous.categories.keys())
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .map(|category| {
            let now = current.categories.get(category).copied().unwrap_or_default();
            let before = previous.categories.get(category).copied().unwrap_or_default();
            CategoryChange {
                category: category.clone(),
                current: now,
                previous: before,
                change: now - before,
            }
        })
        .collect();
    category_changes.sort_by(|a, b| b.change.abs().cmp(&a.change.abs()));

    let monthly_totals = history
        .iter()
        .zip(&totals)
        .rev()
        .map(|(m, total)| MonthTotal {
            month: m.month.clone(),
            total: *total,
        })
        .collect();

    if current_total > average_total && current_total > previous_total {
        warnings.push(format!(
            "{} spending is above both the previous month and the period average.",
            current.month
        ));
    }

    let output = SpendingAnalysis {
        current_month: current.month.clone(),
        current_total,
        previous_total,
        average_total,
        change_vs_previous_pct,
        change_vs_average_pct,
        category_breakdown,
        category_changes,
        monthly_totals,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "ordering": "most recent month first",
        "months": history.len(),
    });

    Ok(with_metadata(
        "Month-over-month spending comparison",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn month(name: &str, housing: Decimal, food: Decimal) -> MonthlySpending {
        let mut categories = BTreeMap::new();
        categories.insert("Housing".to_string(), housing);
        categories.insert("Food".to_string(), food);
        MonthlySpending {
            month: name.to_string(),
            categories,
        }
    }

    #[test]
    fn test_changes() {
        let history = vec![
            month("Mar", dec!(1200), dec!(600)),
            month("Feb", dec!(1200), dec!(300)),
            month("Jan", dec!(1200), dec!(0)),
        ];
        let out = analyze_spending(&history).unwrap();
        let s = &out.result;
        assert_eq!(s.current_total, dec!(1800));
        assert_eq!(s.previous_total, dec!(1500));
        assert_eq!(s.average_total, dec!(1500));
        assert_eq!(s.change_vs_previous_pct, dec!(20));
        assert_eq!(s.change_vs_average_pct, dec!(20));
        assert_eq!(s.category_changes[0].category, "Food");
        assert_eq!(s.category_changes[0].change, dec!(300));
        assert_eq!(s.monthly_totals[0].month, "Jan");
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_breakdown_shares() {
        let history = vec![month("Mar", dec!(750), dec!(250)), month("Feb", dec!(1), dec!(1))];
        let out = analyze_spending(&history).unwrap();
        let food = out
            .result
            .category_breakdown
            .iter()
            .find(|c| c.category == "Food")
            .unwrap();
        assert_eq!(food.share_pct, dec!(25));
    }

    #[test]
    fn test_zero_previous_total_fails() {
        let history = vec![month("Mar", dec!(100), dec!(0)), month("Feb", dec!(0), dec!(0))];
        match analyze_spending(&history).unwrap_err() {
            DomainError::DivisionByZero { context } => assert!(context.contains("previous")),
            other => panic!("Expected DivisionByZero, got {other:?}"),
        }
    }

    #[test]
    fn test_single_month_insufficient() {
        let history = vec![month("Mar", dec!(100), dec!(0))];
        assert!(matches!(
            analyze_spending(&history).unwrap_err(),
            DomainError::InsufficientData(_)
        ));
    }

    #[test]
    fn test_flat_json_shape() {
        let json = r#"{ "month": "Mar", "Housing": "1200", "Food": "480" }"#;
        let m: MonthlySpending = serde_json::from_str(json).unwrap();
        assert_eq!(m.month, "Mar");
        assert_eq!(m.total().unwrap(), dec!(1680));
    }

    #[test]
    fn test_month_total_out_of_range() {
        let history = vec![
            month("Mar", Decimal::MAX, dec!(1)),
            month("Feb", dec!(1200), dec!(300)),
        ];
        match analyze_spending(&history).unwrap_err() {
            DomainError::Overflow { context } => assert_eq!(context, "monthly spending total"),
            other => panic!("Expected Overflow, got {other:?}"),
        }
    }
}
