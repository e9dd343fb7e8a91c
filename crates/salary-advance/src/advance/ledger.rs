use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::loan::AmortizationRow;
use super::salary::PayFrequency;

/// Identifier wrapper for recorded loans.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoanId(pub String);

impl LoanId {
    /// Fresh collision-resistant identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Approval-time snapshot of the request and the derived figures. The
/// loan term fields are copied as submitted, whether or not loan math
/// ran on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSnapshot {
    pub gross_salary: f64,
    pub pay_frequency: PayFrequency,
    pub advance_amount: f64,
    pub fee: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_term: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_repayable: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amortization_schedule: Option<Vec<AmortizationRow>>,
}

/// Immutable ledger entry: the snapshot plus identity and recording
/// time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub loan_id: LoanId,
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub snapshot: LoanSnapshot,
}

/// Storage abstraction so the orchestrator can be exercised against
/// in-memory doubles. Implementations assign the identifier and the
/// recording time inside `record`, and the insert must be atomic from
/// a reader's perspective.
pub trait LoanLedger: Send + Sync {
    fn record(&self, snapshot: LoanSnapshot) -> Result<LoanId, LedgerError>;
    fn fetch(&self, id: &LoanId) -> Result<Option<LoanRecord>, LedgerError>;
}

/// Error enumeration for ledger failures.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("loan not found")]
    NotFound,
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}
