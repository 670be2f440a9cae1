use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::DomainError;
use crate::types::{Fraction, Money, Percent};
use crate::DomainResult;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Longest savings projection accepted, in years.
pub const MAX_GROWTH_YEARS: u32 = 100;

/// Map a failed `checked_*` operation to `DomainError::Overflow`.
pub fn checked(value: Option<Decimal>, context: &str) -> DomainResult<Decimal> {
    value.ok_or_else(|| DomainError::Overflow {
        context: context.to_string(),
    })
}

/// Sum `values`, failing instead of leaving the decimal range.
pub fn checked_sum<I>(values: I, context: &str) -> DomainResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| checked(acc.checked_add(v), context))
}

/// Convert an annual percentage (3.5) to a periodic fraction for `periods`
/// compounding periods per year.
pub fn periodic_rate(annual_rate_pct: Percent, periods: u32) -> Fraction {
    annual_rate_pct / dec!(100) / Decimal::from(periods)
}

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
pub fn compound(rate: Fraction, n: u32) -> DomainResult<Decimal> {
    let factor = Decimal::ONE + rate;
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = result.checked_mul(factor).ok_or_else(|| DomainError::Overflow {
            context: format!("compounding {rate} over {n} periods"),
        })?;
    }
    Ok(result)
}

/// Level payment that amortizes `principal` over `n` periods at `rate` per
/// period. A zero rate degenerates to straight-line repayment.
pub fn annuity_payment(principal: Money, rate: Fraction, n: u32) -> DomainResult<Money> {
    if n == 0 {
        return Err(DomainError::invalid("periods", "Number of periods must be > 0"));
    }
    if rate.is_zero() {
        return checked(principal.checked_div(Decimal::from(n)), "annuity payment");
    }

    let factor = compound(rate, n)?;
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(DomainError::DivisionByZero {
            context: "annuity payment factor".into(),
        });
    }

    checked(
        principal
            .checked_mul(rate)
            .and_then(|v| v.checked_mul(factor))
            .and_then(|v| v.checked_div(denominator)),
        "annuity payment",
    )
}

/// Future value of `n` level end-of-period payments at `rate` per period.
pub fn annuity_future_value(payment: Money, rate: Fraction, n: u32) -> DomainResult<Money> {
    if rate.is_zero() {
        return checked(payment.checked_mul(Decimal::from(n)), "annuity future value");
    }
    let factor = compound(rate, n)?;
    checked(
        payment
            .checked_mul(factor - Decimal::ONE)
            .and_then(|v| v.checked_div(rate)),
        "annuity future value",
    )
}

/// Divide, failing explicitly on a zero denominator or a quotient outside
/// the decimal range.
pub fn safe_divide(
    numerator: Decimal,
    denominator: Decimal,
    context: &str,
) -> DomainResult<Decimal> {
    if denominator.is_zero() {
        return Err(DomainError::DivisionByZero {
            context: context.to_string(),
        });
    }
    checked(numerator.checked_div(denominator), context)
}

/// `part / whole * 100`, failing explicitly on a zero whole.
pub fn percent_of(part: Decimal, whole: Decimal, context: &str) -> DomainResult<Percent> {
    checked(safe_divide(part, whole, context)?.checked_mul(dec!(100)), context)
}
