//! The demo household the dashboard ships with.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

use crate::dashboard::HouseholdData;
use crate::growth::SavingsHabit;
use crate::household::balance_sheet::{Account, AccountKind, Investment, Loan};
use crate::household::cash_flow::{ExpenseLine, IncomeLine};
use crate::household::{MonthlySpending, Recommendation, RecommendationCategory, SavingsGoal};

const SPENDING_CATEGORIES: [&str; 6] = [
    "Housing",
    "Transportation",
    "Food",
    "Utilities",
    "Entertainment",
    "Other",
];

fn spending_month(month: &str, amounts: [Decimal; 6]) -> MonthlySpending {
    let categories: BTreeMap<String, Decimal> = SPENDING_CATEGORIES
        .iter()
        .map(|c| c.to_string())
        .zip(amounts)
        .collect();
    MonthlySpending {
        month: month.to_string(),
        categories,
    }
}

fn recommendation(
    title: &str,
    description: &str,
    impact: Decimal,
    category: RecommendationCategory,
) -> Recommendation {
    Recommendation {
        title: title.to_string(),
        description: description.to_string(),
        impact,
        category,
    }
}

/// Demo household. The profile is left to the config default.
pub fn sample_household() -> HouseholdData {
    HouseholdData {
        profile: None,
        accounts: vec![
            Account {
                name: "Checking Account".into(),
                balance: dec!(2500),
                kind: AccountKind::Checking,
            },
            Account {
                name: "Savings Account".into(),
                balance: dec!(7500),
                kind: AccountKind::Savings,
            },
            Account {
                name: "Investment Account".into(),
                balance: dec!(1800),
                kind: AccountKind::Investment,
            },
        ],
        investments: vec![
            Investment {
                name: "Stock Portfolio".into(),
                balance: dec!(18000),
                growth_pct: dec!(8.2),
            },
            Investment {
                name: "Bond Fund".into(),
                balance: dec!(12000),
                growth_pct: dec!(3.5),
            },
            Investment {
                name: "Retirement Fund".into(),
                balance: dec!(45000),
                growth_pct: dec!(5.1),
            },
        ],
        loans: vec![
            Loan {
                name: "Car Loan".into(),
                balance: dec!(8000),
                rate_pct: dec!(4.2),
                monthly_payment: dec!(350),
            },
            Loan {
                name: "Credit Card".into(),
                balance: dec!(1500),
                rate_pct: dec!(18.0),
                monthly_payment: dec!(200),
            },
        ],
        income: vec![
            IncomeLine {
                source: "Salary".into(),
                amount: dec!(3500),
            },
            IncomeLine {
                source: "Side Income".into(),
                amount: dec!(500),
            },
        ],
        expenses: vec![
            ExpenseLine {
                category: "Housing".into(),
                amount: dec!(1200),
            },
            ExpenseLine {
                category: "Transportation".into(),
                amount: dec!(350),
            },
            ExpenseLine {
                category: "Food".into(),
                amount: dec!(450),
            },
            ExpenseLine {
                category: "Utilities".into(),
                amount: dec!(200),
            },
            ExpenseLine {
                category: "Entertainment".into(),
                amount: dec!(300),
            },
            ExpenseLine {
                category: "Other".into(),
                amount: dec!(250),
            },
        ],
        spending_history: vec![
            spending_month("Mar", [dec!(1200), dec!(350), dec!(480), dec!(210), dec!(320), dec!(230)]),
            spending_month("Feb", [dec!(1200), dec!(330), dec!(430), dec!(190), dec!(290), dec!(240)]),
            spending_month("Jan", [dec!(1200), dec!(340), dec!(460), dec!(210), dec!(310), dec!(200)]),
            spending_month("Dec", [dec!(1200), dec!(370), dec!(510), dec!(230), dec!(380), dec!(270)]),
            spending_month("Nov", [dec!(1200), dec!(320), dec!(420), dec!(200), dec!(260), dec!(220)]),
            spending_month("Oct", [dec!(1200), dec!(350), dec!(440), dec!(190), dec!(280), dec!(210)]),
        ],
        goals: vec![
            SavingsGoal {
                name: "Emergency Fund".into(),
                current: dec!(7500),
                target: dec!(10000),
                deadline: "2025-12".into(),
            },
            SavingsGoal {
                name: "Vacation".into(),
                current: dec!(1200),
                target: dec!(3000),
                deadline: "2025-08".into(),
            },
            SavingsGoal {
                name: "Home Renovation".into(),
                current: dec!(5000),
                target: dec!(15000),
                deadline: "2026-06".into(),
            },
        ],
        habits: vec![
            SavingsHabit {
                name: "Coffee Savings".into(),
                monthly_amount: dec!(88),
            },
            SavingsHabit {
                name: "Lunch Savings".into(),
                monthly_amount: dec!(132),
            },
        ],
        recommendations: vec![
            recommendation(
                "Optimize Your Entertainment Budget",
                "Reducing entertainment spending by 15% saves about 45 a month.",
                dec!(540),
                RecommendationCategory::Expense,
            ),
            recommendation(
                "Refinance Your Mortgage",
                "Current rates are 0.4% below your mortgage rate.",
                dec!(1344),
                RecommendationCategory::Loan,
            ),
            recommendation(
                "Increase Retirement Contributions",
                "An extra 100 a month could grow to about 30,000 over 15 years.",
                dec!(30000),
                RecommendationCategory::Investment,
            ),
            recommendation(
                "Consolidate Credit Card Debt",
                "Moving the card balance to a 0% intro APR card saves interest this year.",
                dec!(270),
                RecommendationCategory::Loan,
            ),
            recommendation(
                "Switch to a High-Yield Savings Account",
                "A high-yield account would earn about 188 more interest a year.",
                dec!(188),
                RecommendationCategory::Savings,
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_spending_totals() {
        let household = sample_household();
        assert_eq!(household.spending_history.len(), 6);
        assert_eq!(household.spending_history[0].total().unwrap(), dec!(2790));
        assert_eq!(household.spending_history[1].total().unwrap(), dec!(2680));
    }
}
