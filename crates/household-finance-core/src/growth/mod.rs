pub mod habits;
pub mod projection;

pub use habits::{compare_savings_habits, HabitComparisonInput, SavingsHabit};
pub use projection::{project_compound_growth, GrowthPoint, GrowthProjection};
