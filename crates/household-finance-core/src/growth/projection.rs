use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::time_value::{self, MAX_GROWTH_YEARS, MONTHS_PER_YEAR};
use crate::types::{Fraction, Money, Percent};
use crate::DomainResult;

/// Cumulative value of a savings plan at the end of one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub year: u32,
    pub contributed: Money,
    pub value: Money,
    pub growth: Money,
}

/// Yearly values of a level monthly contribution invested at a fixed annual
/// return, compounded annually.
///
/// The projection is validated up front and can be iterated any number of
/// times; every pass yields the same `years` points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthProjection {
    monthly_contribution: Money,
    annual_rate_pct: Percent,
    years: u32,
}

/// Project `monthly_contribution` saved every month and invested at
/// `annual_rate_pct`, for years `1..=years`.
///
/// `FV(year) = monthly_contribution * 12 * ((1 + r)^year - 1) / r`, and
/// exactly `monthly_contribution * 12 * year` when `r == 0`.
pub fn project_compound_growth(
    monthly_contribution: Money,
    annual_rate_pct: Percent,
    years: u32,
) -> DomainResult<GrowthProjection> {
    if monthly_contribution < Decimal::ZERO {
        return Err(DomainError::invalid(
            "monthly_contribution",
            "Contribution cannot be negative.",
        ));
    }
    if annual_rate_pct < Decimal::ZERO {
        return Err(DomainError::invalid(
            "annual_rate_pct",
            "Annual return cannot be negative.",
        ));
    }
    if years == 0 {
        return Err(DomainError::invalid("years", "Projection horizon must be positive."));
    }
    if years > MAX_GROWTH_YEARS {
        return Err(DomainError::invalid(
            "years",
            format!("Projection horizon cannot exceed {MAX_GROWTH_YEARS} years."),
        ));
    }

    let projection = GrowthProjection {
        monthly_contribution,
        annual_rate_pct,
        years,
    };
    // Values and contributions grow monotonically, so the last year bounds
    // every point the iterator produces.
    let annual_contribution = time_value::checked(
        monthly_contribution.checked_mul(Decimal::from(MONTHS_PER_YEAR)),
        "annual contribution",
    )?;
    let final_value =
        time_value::annuity_future_value(annual_contribution, projection.rate(), years)?;

    tracing::debug!(
        %monthly_contribution,
        %annual_rate_pct,
        years,
        %final_value,
        "growth projection"
    );
    Ok(projection)
}

impl GrowthProjection {
    pub fn monthly_contribution(&self) -> Money {
        self.monthly_contribution
    }

    pub fn annual_rate_pct(&self) -> Percent {
        self.annual_rate_pct
    }

    pub fn years(&self) -> u32 {
        self.years
    }

    fn annual_contribution(&self) -> Money {
        self.monthly_contribution * Decimal::from(MONTHS_PER_YEAR)
    }

    fn rate(&self) -> Fraction {
        self.annual_rate_pct / dec!(100)
    }

    /// Iterate the yearly points from year 1.
    pub fn iter(&self) -> GrowthIter {
        GrowthIter {
            annual_contribution: self.annual_contribution(),
            rate: self.rate(),
            factor: Decimal::ONE,
            year: 0,
            years: self.years,
        }
    }

    /// The value after the final year.
    pub fn final_value(&self) -> Money {
        self.iter().last().map(|p| p.value).unwrap_or(Decimal::ZERO)
    }

    pub fn points(&self) -> Vec<GrowthPoint> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a GrowthProjection {
    type Item = GrowthPoint;
    type IntoIter = GrowthIter;

    fn into_iter(self) -> GrowthIter {
        self.iter()
    }
}

/// Iterator over a [`GrowthProjection`]. Carries `(1 + r)^year` forward so
/// each step costs one multiplication.
#[derive(Debug, Clone)]
pub struct GrowthIter {
    annual_contribution: Money,
    rate: Fraction,
    factor: Decimal,
    year: u32,
    years: u32,
}

impl Iterator for GrowthIter {
    type Item = GrowthPoint;

    fn next(&mut self) -> Option<GrowthPoint> {
        if self.year >= self.years {
            return None;
        }
        self.year += 1;

        let year = Decimal::from(self.year);
        let contributed = self.annual_contribution * year;
        let value = if self.rate.is_zero() {
            contributed
        } else {
            self.factor *= Decimal::ONE + self.rate;
            self.annual_contribution * (self.factor - Decimal::ONE) / self.rate
        };

        Some(GrowthPoint {
            year: self.year,
            contributed,
            value,
            growth: value - contributed,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.years - self.year) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GrowthIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_first_year_matches_closed_form() {
        let p = project_compound_growth(dec!(100), dec!(7), 1).unwrap();
        let first = p.iter().next().unwrap();
        // 100 * 12 * ((1.07 - 1) / 0.07) = 1200
        assert_eq!(first.year, 1);
        assert_eq!(first.value, dec!(1200));
        assert_eq!(first.growth, Decimal::ZERO);
    }

    #[test]
    fn test_second_year_compounds() {
        let p = project_compound_growth(dec!(100), dec!(7), 2).unwrap();
        let points = p.points();
        // 1200 * 1.07 + 1200 = 2484
        assert_eq!(points[1].value, dec!(2484));
        assert_eq!(points[1].contributed, dec!(2400));
        assert_eq!(points[1].growth, dec!(84));
    }

    #[test]
    fn test_zero_rate_is_linear() {
        let p = project_compound_growth(dec!(88), Decimal::ZERO, 5).unwrap();
        for point in &p {
            assert_eq!(point.value, dec!(88) * dec!(12) * Decimal::from(point.year));
        }
    }

    #[test]
    fn test_restartable() {
        let p = project_compound_growth(dec!(50), dec!(5), 10).unwrap();
        let first: Vec<_> = p.iter().collect();
        let second: Vec<_> = p.iter().collect();
        assert_eq!(first, second);
        assert_eq!(p.iter().len(), 10);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(project_compound_growth(dec!(-1), dec!(7), 10).is_err());
        assert!(project_compound_growth(dec!(100), dec!(-7), 10).is_err());
        assert!(project_compound_growth(dec!(100), dec!(7), 0).is_err());
    }

    #[test]
    fn test_out_of_range_growth_rejected() {
        let err = project_compound_growth(dec!(1000), dec!(10000), 100).unwrap_err();
        assert!(matches!(err, DomainError::Overflow { .. }));
    }

    #[test]
    fn test_huge_contribution_at_zero_rate_is_overflow() {
        let err = project_compound_growth(Decimal::MAX, Decimal::ZERO, 1).unwrap_err();
        assert!(matches!(err, DomainError::Overflow { .. }));

        // 1e27 a month fits, but not once multiplied out over 100 years.
        let monthly = Decimal::from_i128_with_scale(10i128.pow(27), 0);
        let err = project_compound_growth(monthly, Decimal::ZERO, 100).unwrap_err();
        assert!(matches!(err, DomainError::Overflow { .. }));
    }

    #[test]
    fn test_horizon_capped() {
        assert_eq!(
            project_compound_growth(dec!(1), dec!(7), MAX_GROWTH_YEARS)
                .unwrap()
                .iter()
                .len(),
            MAX_GROWTH_YEARS as usize
        );
        match project_compound_growth(dec!(1), dec!(7), 4_000_000_000).unwrap_err() {
            DomainError::InvalidInput { field, .. } => assert_eq!(field, "years"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }
}
