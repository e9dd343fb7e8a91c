//! Salary advance decisioning.
//!
//! A request flows through salary normalization, the eligibility and
//! fee rules, optional loan math, and finally the loan ledger. The
//! [`service::AdvanceService`] sequences those steps; [`router`]
//! exposes them over HTTP.

pub mod eligibility;
pub mod export;
pub mod fee;
pub mod ledger;
pub mod loan;
mod money;
pub mod router;
pub mod salary;
pub mod service;

#[cfg(test)]
mod tests;

pub use eligibility::Eligibility;
pub use export::{ScheduleExport, SCHEDULE_FILENAME};
pub use ledger::{LedgerError, LoanId, LoanLedger, LoanRecord, LoanSnapshot};
pub use loan::{AmortizationRow, LoanError};
pub use router::advance_router;
pub use salary::{InvalidFrequency, PayFrequency};
pub use service::{
    AdvanceDecision, AdvanceOutcome, AdvanceRequest, AdvanceService, AdvanceServiceError,
    DecisionStatus,
};
