use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::metrics::profile::{MAX_INTEREST_RATE_PCT, MAX_LOAN_TERM_YEARS};
use crate::time_value::{self, checked, checked_sum, MONTHS_PER_YEAR};
use crate::types::{Money, Percent};
use crate::DomainResult;

/// One year of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationYear {
    pub year: u32,
    pub payments: Money,
    pub interest_paid: Money,
    pub principal_paid: Money,
    pub ending_balance: Money,
}

fn validate_loan(principal: Money, annual_rate_pct: Percent, term_years: u32) -> DomainResult<()> {
    if principal < Decimal::ZERO {
        return Err(DomainError::invalid("principal", "Principal cannot be negative."));
    }
    if annual_rate_pct < Decimal::ZERO {
        return Err(DomainError::invalid(
            "annual_rate_pct",
            "Interest rate cannot be negative.",
        ));
    }
    if annual_rate_pct > MAX_INTEREST_RATE_PCT {
        return Err(DomainError::invalid(
            "annual_rate_pct",
            format!("Interest rate cannot exceed {MAX_INTEREST_RATE_PCT}%."),
        ));
    }
    if term_years == 0 {
        return Err(DomainError::invalid("term_years", "Loan term must be positive."));
    }
    if term_years > MAX_LOAN_TERM_YEARS {
        return Err(DomainError::invalid(
            "term_years",
            format!("Loan term cannot exceed {MAX_LOAN_TERM_YEARS} years."),
        ));
    }
    Ok(())
}

/// Fixed monthly payment that fully amortizes `principal` over
/// `term_years` at `annual_rate_pct` compounded monthly.
///
/// At a 0% rate the payment is `principal / (12 * term_years)`.
pub fn compute_monthly_payment(
    principal: Money,
    annual_rate_pct: Percent,
    term_years: u32,
) -> DomainResult<Money> {
    validate_loan(principal, annual_rate_pct, term_years)?;

    let n = term_years * MONTHS_PER_YEAR;
    let r = time_value::periodic_rate(annual_rate_pct, MONTHS_PER_YEAR);
    let payment = time_value::annuity_payment(principal, r, n)?;

    tracing::debug!(%principal, %annual_rate_pct, term_years, %payment, "monthly payment");
    Ok(payment)
}

/// Year-by-year amortization of a fixed-rate loan. Interest accrues monthly
/// on the outstanding balance and is rounded to cents, as a lender would
/// post it; the final payment is trimmed so the closing balance is exactly zero.
pub fn amortization_schedule(
    principal: Money,
    annual_rate_pct: Percent,
    term_years: u32,
) -> DomainResult<Vec<AmortizationYear>> {
    let payment = compute_monthly_payment(principal, annual_rate_pct, term_years)?.round_dp(2);
    let r = time_value::periodic_rate(annual_rate_pct, MONTHS_PER_YEAR);

    let mut balance = principal.round_dp(2);
    let mut schedule = Vec::with_capacity(term_years as usize);

    for year in 1..=term_years {
        let mut row = AmortizationYear {
            year,
            payments: Decimal::ZERO,
            interest_paid: Decimal::ZERO,
            principal_paid: Decimal::ZERO,
            ending_balance: Decimal::ZERO,
        };

        for month in 1..=MONTHS_PER_YEAR {
            let interest = checked(balance.checked_mul(r), "monthly interest")?.round_dp(2);
            let is_last = year == term_years && month == MONTHS_PER_YEAR;
            let principal_part = if is_last {
                balance
            } else {
                (payment - interest).min(balance)
            };

            row.payments = checked_sum(
                [row.payments, interest, principal_part],
                "yearly loan payments",
            )?;
            row.interest_paid = checked_sum([row.interest_paid, interest], "yearly interest")?;
            row.principal_paid += principal_part;
            balance -= principal_part;
        }

        row.ending_balance = balance;
        schedule.push(row);
    }

    Ok(schedule)
}
