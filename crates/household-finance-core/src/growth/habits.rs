use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::DomainError;
use crate::growth::projection::{project_compound_growth, GrowthPoint};
use crate::time_value::checked_sum;
use crate::types::*;
use crate::DomainResult;

/// Name of the series that sums every habit.
pub const COMBINED_SERIES: &str = "All Combined";

/// A small recurring spend that could be redirected into savings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsHabit {
    pub name: String,
    pub monthly_amount: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitComparisonInput {
    pub habits: Vec<SavingsHabit>,
    #[serde(default = "default_rate")]
    pub annual_rate_pct: Percent,
    #[serde(default = "default_years")]
    pub years: u32,
}

fn default_rate() -> Percent {
    dec!(7)
}

fn default_years() -> u32 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitSeries {
    pub name: String,
    pub monthly_amount: Money,
    pub final_value: Money,
    pub total_contributed: Money,
    pub points: Vec<GrowthPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitComparisonOutput {
    pub series: Vec<HabitSeries>,
    pub combined: HabitSeries,
}

fn build_series(
    name: &str,
    monthly_amount: Money,
    rate: Percent,
    years: u32,
) -> DomainResult<HabitSeries> {
    let projection = project_compound_growth(monthly_amount, rate, years)?;
    let points = projection.points();
    let (final_value, total_contributed) = points
        .last()
        .map(|p| (p.value, p.contributed))
        .unwrap_or((Decimal::ZERO, Decimal::ZERO));
    Ok(HabitSeries {
        name: name.to_string(),
        monthly_amount,
        final_value,
        total_contributed,
        points,
    })
}

/// Project each habit's savings, plus all habits together, invested at a
/// fixed annual return.
pub fn compare_savings_habits(
    input: &HabitComparisonInput,
) -> DomainResult<ComputationOutput<HabitComparisonOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.habits.is_empty() {
        return Err(DomainError::InsufficientData(
            "At least one savings habit is required".into(),
        ));
    }

    let mut series = Vec::with_capacity(input.habits.len());
    for habit in &input.habits {
        if habit.monthly_amount.is_zero() {
            warnings.push(format!("Habit '{}' has a zero monthly amount.", habit.name));
        }
        series.push(build_series(
            &habit.name,
            habit.monthly_amount,
            input.annual_rate_pct,
            input.years,
        )?);
    }

    let combined_amount = checked_sum(
        input.habits.iter().map(|h| h.monthly_amount),
        "combined monthly savings",
    )?;
    let combined = build_series(
        COMBINED_SERIES,
        combined_amount,
        input.annual_rate_pct,
        input.years,
    )?;

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "annual_rate_pct": input.annual_rate_pct,
        "years": input.years,
        "compounding": "annual, contributions at year end",
    });

    Ok(with_metadata(
        "Future value of an ordinary annuity per savings habit",
        &assumptions,
        warnings,
        elapsed,
        HabitComparisonOutput { series, combined },
    ))
}
