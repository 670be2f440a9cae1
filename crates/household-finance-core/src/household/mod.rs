pub mod balance_sheet;
pub mod cash_flow;
pub mod goals;
pub mod insights;
pub mod spending;

pub use balance_sheet::{summarize_balance_sheet, BalanceSheetInput};
pub use cash_flow::{analyze_cash_flow, CashFlowInput};
pub use goals::{evaluate_goals, SavingsGoal};
pub use insights::{select_recommendations, Recommendation, RecommendationCategory};
pub use spending::{analyze_spending, MonthlySpending};
