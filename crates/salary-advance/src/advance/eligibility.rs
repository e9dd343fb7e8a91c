/// Monthly salary below this figure disqualifies the applicant outright.
pub const MIN_MONTHLY_SALARY: f64 = 1000.0;

/// An advance may not exceed this share of the monthly salary.
pub const MAX_ADVANCE_RATIO: f64 = 0.5;

/// Outcome of the salary threshold and advance cap checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eligibility {
    pub eligible: bool,
    pub max_advance: f64,
    pub advance_approved: bool,
}

/// Apply the minimum-salary threshold and the half-salary advance cap.
/// An ineligible applicant gets a zero cap and no approval; the caller
/// stops there.
pub fn evaluate(monthly_salary: f64, advance_amount: f64) -> Eligibility {
    if monthly_salary < MIN_MONTHLY_SALARY {
        return Eligibility {
            eligible: false,
            max_advance: 0.0,
            advance_approved: false,
        };
    }

    let max_advance = monthly_salary * MAX_ADVANCE_RATIO;
    Eligibility {
        eligible: true,
        max_advance,
        advance_approved: advance_amount <= max_advance,
    }
}
