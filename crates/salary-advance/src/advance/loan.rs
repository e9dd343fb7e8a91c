use serde::{Deserialize, Serialize};

use super::money::round_cents;

/// One month of a level-payment schedule. Serde names keep the wire and
/// CSV casing the form expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "Payment")]
    pub payment: f64,
    #[serde(rename = "Principal")]
    pub principal: f64,
    #[serde(rename = "Interest")]
    pub interest: f64,
    #[serde(rename = "Balance")]
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoanError {
    #[error("loan_term must be at least one month")]
    InvalidTerm,
}

/// Total owed after compounding the annual rate monthly over the full
/// term, rounded to cents.
pub fn total_repayable(
    principal: f64,
    annual_rate_pct: f64,
    term_months: u32,
) -> Result<f64, LoanError> {
    if term_months == 0 {
        return Err(LoanError::InvalidTerm);
    }

    let rate_per_period = annual_rate_pct / 100.0 / 12.0;
    let total = principal * (1.0 + rate_per_period).powi(term_months as i32);
    Ok(round_cents(total))
}

/// Build the level-payment amortization schedule.
///
/// The monthly payment is rounded to cents before the loop; the final
/// month then absorbs whatever residual that rounding leaves so the
/// balance always ends at exactly zero. The running balance itself is
/// never rounded, only the emitted row values are.
pub fn amortize(
    principal: f64,
    annual_rate_pct: f64,
    term_months: u32,
) -> Result<Vec<AmortizationRow>, LoanError> {
    if term_months == 0 {
        return Err(LoanError::InvalidTerm);
    }

    let monthly_rate = annual_rate_pct / 100.0 / 12.0;
    let payment = if monthly_rate == 0.0 {
        principal / f64::from(term_months)
    } else {
        principal * (monthly_rate * (1.0 + monthly_rate).powi(term_months as i32))
            / ((1.0 + monthly_rate).powi(term_months as i32) - 1.0)
    };
    let payment = round_cents(payment);

    let mut rows = Vec::with_capacity(term_months as usize);
    let mut balance = principal;

    for month in 1..=term_months {
        let interest = balance * monthly_rate;
        let principal_portion = (payment - interest).min(balance);
        let remaining = balance - principal_portion;

        if month == term_months && remaining > 0.0 {
            // Residual left by payment rounding: fold it into the final
            // payment and retire the loan.
            let final_payment = principal_portion + remaining;
            rows.push(AmortizationRow {
                month,
                payment: round_cents(final_payment),
                principal: round_cents(final_payment - interest),
                interest: round_cents(interest),
                balance: 0.0,
            });
            balance = 0.0;
        } else {
            balance = remaining.max(0.0);
            rows.push(AmortizationRow {
                month,
                payment,
                principal: round_cents(principal_portion),
                interest: round_cents(interest),
                balance: round_cents(balance),
            });
        }
    }

    Ok(rows)
}
