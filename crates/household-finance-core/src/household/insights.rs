use serde::{Deserialize, Serialize};

use crate::types::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Expense,
    Loan,
    Investment,
    Savings,
}

/// A canned "smart insight" shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    /// Estimated yearly benefit (or total for long-horizon investment tips).
    pub impact: Money,
    pub category: RecommendationCategory,
}

/// Recommendations in any of `categories` (all when empty), highest impact
/// first, at most `limit`.
pub fn select_recommendations(
    recommendations: &[Recommendation],
    categories: &[RecommendationCategory],
    limit: usize,
) -> Vec<Recommendation> {
    let mut selected: Vec<Recommendation> = recommendations
        .iter()
        .filter(|r| categories.is_empty() || categories.contains(&r.category))
        .cloned()
        .collect();
    // Stable sort keeps the authored order among equal impacts.
    selected.sort_by(|a, b| b.impact.cmp(&a.impact));
    selected.truncate(limit);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rec(title: &str, impact: Money, category: RecommendationCategory) -> Recommendation {
        Recommendation {
            title: title.into(),
            description: String::new(),
            impact,
            category,
        }
    }

    #[test]
    fn test_filter_and_order() {
        let recs = vec![
            rec("Budget", dec!(540), RecommendationCategory::Expense),
            rec("Retirement", dec!(30000), RecommendationCategory::Investment),
            rec("High-yield", dec!(188), RecommendationCategory::Savings),
        ];
        let picked = select_recommendations(
            &recs,
            &[RecommendationCategory::Investment, RecommendationCategory::Savings],
            2,
        );
        let titles: Vec<_> = picked.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Retirement", "High-yield"]);
    }

    #[test]
    fn test_empty_categories_selects_all() {
        let recs = vec![
            rec("A", dec!(1), RecommendationCategory::Loan),
            rec("B", dec!(2), RecommendationCategory::Expense),
        ];
        let picked = select_recommendations(&recs, &[], 10);
        assert_eq!(picked.len(), 2);
        assert_eq!(picked[0].title, "B");
    }
}
