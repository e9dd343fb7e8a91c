use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::advance::ledger::{LedgerError, LoanId, LoanLedger, LoanRecord, LoanSnapshot};
use crate::advance::salary::PayFrequency;
use crate::advance::service::{AdvanceRequest, AdvanceService};

/// In-memory ledger double mirroring what the API wiring provides.
#[derive(Default)]
pub(super) struct MemoryLedger {
    records: Mutex<HashMap<LoanId, LoanRecord>>,
}

impl MemoryLedger {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("ledger mutex poisoned").len()
    }
}

impl LoanLedger for MemoryLedger {
    fn record(&self, snapshot: LoanSnapshot) -> Result<LoanId, LedgerError> {
        let loan_id = LoanId::generate();
        let record = LoanRecord {
            loan_id: loan_id.clone(),
            recorded_at: Utc::now(),
            snapshot,
        };
        let mut guard = self.records.lock().expect("ledger mutex poisoned");
        guard.insert(loan_id.clone(), record);
        Ok(loan_id)
    }

    fn fetch(&self, id: &LoanId) -> Result<Option<LoanRecord>, LedgerError> {
        let guard = self.records.lock().expect("ledger mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

/// Ledger double that fails every call.
pub(super) struct UnavailableLedger;

impl LoanLedger for UnavailableLedger {
    fn record(&self, _snapshot: LoanSnapshot) -> Result<LoanId, LedgerError> {
        Err(LedgerError::Unavailable("ledger offline".to_string()))
    }

    fn fetch(&self, _id: &LoanId) -> Result<Option<LoanRecord>, LedgerError> {
        Err(LedgerError::Unavailable("ledger offline".to_string()))
    }
}

pub(super) fn build_service() -> (Arc<AdvanceService<MemoryLedger>>, Arc<MemoryLedger>) {
    let ledger = Arc::new(MemoryLedger::default());
    let service = Arc::new(AdvanceService::new(ledger.clone()));
    (service, ledger)
}

/// Monthly earner with headroom: eligible, approved, no loan terms.
pub(super) fn approved_request() -> AdvanceRequest {
    AdvanceRequest {
        gross_salary: 4000.0,
        pay_frequency: PayFrequency::Monthly,
        advance_amount: 1000.0,
        loan_amount: None,
        interest_rate: None,
        loan_term: None,
        include_amortization: false,
    }
}

/// Approved advance plus a one-year loan with a schedule.
pub(super) fn loan_request() -> AdvanceRequest {
    AdvanceRequest {
        loan_amount: Some(1000.0),
        interest_rate: Some(12.0),
        loan_term: Some(12),
        include_amortization: true,
        ..approved_request()
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body streams");
    serde_json::from_slice(&bytes).expect("body is json")
}
