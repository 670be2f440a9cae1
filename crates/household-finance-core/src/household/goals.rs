use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::DomainError;
use crate::time_value::percent_of;
use crate::types::*;
use crate::DomainResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub name: String,
    pub current: Money,
    pub target: Money,
    /// Target month as `YYYY-MM`.
    pub deadline: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Achieved,
    InProgress,
    Overdue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalProgress {
    pub name: String,
    pub current: Money,
    pub target: Money,
    pub progress_pct: Percent,
    pub remaining: Money,
    pub deadline: NaiveDate,
    /// Whole months from `as_of` to the deadline month; negative once past.
    pub months_remaining: i32,
    /// Saving needed per month to hit the target by the deadline.
    pub required_monthly_saving: Option<Money>,
    pub status: GoalStatus,
}

fn parse_deadline(goal: &SavingsGoal) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", goal.deadline.trim()), "%Y-%m-%d").map_err(|e| {
        DomainError::DateError(format!(
            "goal '{}': deadline '{}' is not YYYY-MM ({e})",
            goal.name, goal.deadline
        ))
    })
}

fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32
}

/// Progress of each goal as of `as_of`.
pub fn evaluate_goals(
    goals: &[SavingsGoal],
    as_of: NaiveDate,
) -> DomainResult<ComputationOutput<Vec<GoalProgress>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let mut progress = Vec::with_capacity(goals.len());

    for goal in goals {
        if goal.target <= Decimal::ZERO {
            return Err(DomainError::invalid(
                &format!("goals.{}.target", goal.name),
                "Goal target must be positive.",
            ));
        }
        if goal.current < Decimal::ZERO {
            return Err(DomainError::invalid(
                &format!("goals.{}.current", goal.name),
                "Saved amount cannot be negative.",
            ));
        }

        let deadline = parse_deadline(goal)?;
        let months_remaining = months_between(as_of, deadline);
        let remaining = (goal.target - goal.current).max(Decimal::ZERO);
        let progress_pct = percent_of(goal.current, goal.target, "goal target")?;

        let status = if remaining.is_zero() {
            GoalStatus::Achieved
        } else if months_remaining <= 0 {
            warnings.push(format!("Goal '{}' has passed its deadline.", goal.name));
            GoalStatus::Overdue
        } else {
            GoalStatus::InProgress
        };

        let required_monthly_saving = match status {
            GoalStatus::InProgress => Some(remaining / Decimal::from(months_remaining)),
            GoalStatus::Achieved => Some(Decimal::ZERO),
            GoalStatus::Overdue => None,
        };

        progress.push(GoalProgress {
            name: goal.name.clone(),
            current: goal.current,
            target: goal.target,
            progress_pct,
            remaining,
            deadline,
            months_remaining,
            required_monthly_saving,
            status,
        });
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "as_of": as_of,
        "months_remaining": "calendar months from as_of to deadline month",
    });

    Ok(with_metadata(
        "Savings goal progress",
        &assumptions,
        warnings,
        elapsed,
        progress,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn goal(current: Decimal, target: Decimal, deadline: &str) -> SavingsGoal {
        SavingsGoal {
            name: "Emergency Fund".into(),
            current,
            target,
            deadline: deadline.into(),
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    #[test]
    fn test_in_progress_goal() {
        let out = evaluate_goals(&[goal(dec!(7500), dec!(10000), "2025-12")], as_of()).unwrap();
        let g = &out.result[0];
        assert_eq!(g.progress_pct, dec!(75));
        assert_eq!(g.remaining, dec!(2500));
        assert_eq!(g.months_remaining, 9);
        assert_eq!(g.status, GoalStatus::InProgress);
        assert_eq!(g.required_monthly_saving, Some(dec!(2500) / dec!(9)));
    }

    #[test]
    fn test_overdue_and_achieved() {
        let out = evaluate_goals(
            &[
                goal(dec!(100), dec!(1000), "2024-11"),
                goal(dec!(1200), dec!(1000), "2024-11"),
            ],
            as_of(),
        )
        .unwrap();
        assert_eq!(out.result[0].status, GoalStatus::Overdue);
        assert_eq!(out.result[0].months_remaining, -4);
        assert_eq!(out.result[0].required_monthly_saving, None);
        assert_eq!(out.result[1].status, GoalStatus::Achieved);
        assert_eq!(out.result[1].progress_pct, dec!(120));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_bad_deadline() {
        let err = evaluate_goals(&[goal(dec!(1), dec!(2), "December 2025")], as_of()).unwrap_err();
        assert!(matches!(err, DomainError::DateError(_)));
    }

    #[test]
    fn test_zero_target_rejected() {
        let err = evaluate_goals(&[goal(dec!(1), Decimal::ZERO, "2025-12")], as_of()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput { .. }));
    }
}
