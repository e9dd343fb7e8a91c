use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::eligibility::{self, Eligibility, MIN_MONTHLY_SALARY};
use super::export::{ExportError, ScheduleExport};
use super::fee;
use super::ledger::{LedgerError, LoanId, LoanLedger, LoanRecord, LoanSnapshot};
use super::loan::{self, AmortizationRow, LoanError};
use super::money::format_usd;
use super::salary::{monthly_salary, PayFrequency};

/// Advance request as collected by the intake form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvanceRequest {
    pub gross_salary: f64,
    pub pay_frequency: PayFrequency,
    pub advance_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_term: Option<u32>,
    #[serde(default)]
    pub include_amortization: bool,
}

impl AdvanceRequest {
    /// Loan math runs only when every term field is present and
    /// nonzero; a zeroed field means the form section was left blank.
    fn loan_terms(&self) -> Option<LoanTerms> {
        match (self.loan_amount, self.interest_rate, self.loan_term) {
            (Some(amount), Some(rate), Some(term)) if amount > 0.0 && rate > 0.0 && term > 0 => {
                Some(LoanTerms { amount, rate, term })
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct LoanTerms {
    amount: f64,
    rate: f64,
    term: u32,
}

/// Decision payload returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvanceDecision {
    pub eligible: bool,
    pub advance_approved: bool,
    pub max_advance: f64,
    pub approved_amount: f64,
    pub fee: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_repayable: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amortization_schedule: Option<Vec<AmortizationRow>>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_id: Option<LoanId>,
}

impl AdvanceDecision {
    /// Terminal state the request ended in.
    pub fn status(&self) -> DecisionStatus {
        if !self.eligible {
            DecisionStatus::Ineligible
        } else if !self.advance_approved {
            DecisionStatus::Rejected
        } else if self.total_repayable.is_some() {
            DecisionStatus::ApprovedWithLoan
        } else {
            DecisionStatus::Approved
        }
    }
}

/// Terminal states of a processed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    Ineligible,
    Rejected,
    Approved,
    ApprovedWithLoan,
}

impl DecisionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            DecisionStatus::Ineligible => "ineligible",
            DecisionStatus::Rejected => "rejected",
            DecisionStatus::Approved => "approved",
            DecisionStatus::ApprovedWithLoan => "approved_with_loan",
        }
    }
}

/// What processing yields: the decision body, or the CSV document when
/// the caller asked for the export instead.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AdvanceOutcome {
    Export(ScheduleExport),
    Decision(AdvanceDecision),
}

/// Sequences normalization, eligibility, fees, loan math, and the
/// ledger write for one request.
pub struct AdvanceService<L> {
    ledger: Arc<L>,
}

impl<L> AdvanceService<L>
where
    L: LoanLedger + 'static,
{
    pub fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }

    /// Run the full decision for one request. Approval commits exactly
    /// one ledger record (also in export mode); ineligible and
    /// rejected requests commit nothing.
    pub fn process(
        &self,
        request: AdvanceRequest,
        export_csv: bool,
    ) -> Result<AdvanceOutcome, AdvanceServiceError> {
        let monthly = monthly_salary(request.gross_salary, request.pay_frequency);
        let Eligibility {
            eligible,
            max_advance,
            advance_approved,
        } = eligibility::evaluate(monthly, request.advance_amount);

        if !eligible {
            return Ok(AdvanceOutcome::Decision(AdvanceDecision {
                eligible: false,
                advance_approved: false,
                max_advance: 0.0,
                approved_amount: 0.0,
                fee: 0.0,
                total_repayable: None,
                amortization_schedule: None,
                message: format!(
                    "Ineligible: Monthly salary is below the minimum threshold of ${MIN_MONTHLY_SALARY:.0}."
                ),
                loan_id: None,
            }));
        }

        if !advance_approved {
            return Ok(AdvanceOutcome::Decision(AdvanceDecision {
                eligible: true,
                advance_approved: false,
                max_advance,
                approved_amount: 0.0,
                fee: 0.0,
                total_repayable: None,
                amortization_schedule: None,
                message: format!(
                    "Requested advance (${}) exceeds maximum allowed (${}).",
                    format_usd(request.advance_amount),
                    format_usd(max_advance)
                ),
                loan_id: None,
            }));
        }

        let fee = fee::advance_fee(request.advance_amount, true);

        let mut total_repayable = None;
        let mut schedule = None;
        if let Some(terms) = request.loan_terms() {
            total_repayable = Some(loan::total_repayable(terms.amount, terms.rate, terms.term)?);
            if request.include_amortization || export_csv {
                schedule = Some(loan::amortize(terms.amount, terms.rate, terms.term)?);
            }
        }

        let loan_id = self.ledger.record(LoanSnapshot {
            gross_salary: request.gross_salary,
            pay_frequency: request.pay_frequency,
            advance_amount: request.advance_amount,
            fee,
            loan_amount: request.loan_amount,
            interest_rate: request.interest_rate,
            loan_term: request.loan_term,
            total_repayable,
            amortization_schedule: schedule.clone(),
        })?;
        info!(
            loan_id = %loan_id.0,
            approved_amount = request.advance_amount,
            fee,
            "advance approved and recorded"
        );

        if export_csv {
            if let Some(rows) = schedule.as_deref() {
                return Ok(AdvanceOutcome::Export(ScheduleExport::new(rows)?));
            }
        }

        let mut message = format!(
            "Advance approved! Amount: ${}, Fee: ${}",
            format_usd(request.advance_amount),
            format_usd(fee)
        );
        if let (Some(total), Some(terms)) = (total_repayable, request.loan_terms()) {
            message.push_str(&format!(
                ". Loan repayable: ${} over {} months.",
                format_usd(total),
                terms.term
            ));
        }

        Ok(AdvanceOutcome::Decision(AdvanceDecision {
            eligible: true,
            advance_approved: true,
            max_advance,
            approved_amount: request.advance_amount,
            fee,
            total_repayable,
            amortization_schedule: schedule,
            message,
            loan_id: Some(loan_id),
        }))
    }

    /// Fetch a recorded loan for API responses.
    pub fn lookup(&self, loan_id: &LoanId) -> Result<LoanRecord, AdvanceServiceError> {
        let record = self
            .ledger
            .fetch(loan_id)?
            .ok_or(LedgerError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the advance service.
#[derive(Debug, thiserror::Error)]
pub enum AdvanceServiceError {
    #[error(transparent)]
    Loan(#[from] LoanError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
