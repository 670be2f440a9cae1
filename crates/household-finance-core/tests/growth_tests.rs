use household_finance_core::growth::{
    compare_savings_habits, project_compound_growth, HabitComparisonInput, SavingsHabit,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_one_year_at_seven_percent() {
    let projection = project_compound_growth(dec!(100), dec!(7), 1).unwrap();
    let points = projection.points();
    assert_eq!(points.len(), 1);
    let expected = dec!(100) * dec!(12) * ((dec!(1.07) - Decimal::ONE) / dec!(0.07));
    assert!((points[0].value - expected).abs() < dec!(0.01));
}

#[test]
fn test_zero_rate_exactly_linear() {
    let projection = project_compound_growth(dec!(132), Decimal::ZERO, 30).unwrap();
    for point in projection.iter() {
        assert_eq!(point.value, dec!(132) * dec!(12) * Decimal::from(point.year));
        assert_eq!(point.growth, Decimal::ZERO);
    }
}

#[test]
fn test_values_strictly_increase() {
    let projection = project_compound_growth(dec!(88), dec!(7), 30).unwrap();
    let values: Vec<_> = projection.iter().map(|p| p.value).collect();
    assert!(values.windows(2).all(|w| w[1] > w[0]));
    assert_eq!(projection.final_value(), *values.last().unwrap());
}

#[test]
fn test_thirty_year_closed_form() {
    // 88 * 12 * (1.07^30 - 1) / 0.07 ≈ 99,750.59
    let projection = project_compound_growth(dec!(88), dec!(7), 30).unwrap();
    assert!((projection.final_value() - dec!(99750.59)).abs() < dec!(0.01));
}

#[test]
fn test_habit_series_names() {
    let out = compare_savings_habits(&HabitComparisonInput {
        habits: vec![SavingsHabit {
            name: "Coffee Savings".into(),
            monthly_amount: dec!(88),
        }],
        annual_rate_pct: dec!(7),
        years: 5,
    })
    .unwrap();
    assert_eq!(out.result.series[0].name, "Coffee Savings");
    assert_eq!(out.result.combined.name, "All Combined");
    assert_eq!(out.result.combined.final_value, out.result.series[0].final_value);
}
