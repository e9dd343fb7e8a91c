use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use salary_advance::advance::{
    LedgerError, LoanId, LoanLedger, LoanRecord, LoanSnapshot, PayFrequency,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-lifetime loan store. Entries are never updated or evicted;
/// a restart starts from an empty ledger.
#[derive(Default, Clone)]
pub(crate) struct InMemoryLoanLedger {
    records: Arc<Mutex<HashMap<LoanId, LoanRecord>>>,
}

impl LoanLedger for InMemoryLoanLedger {
    fn record(&self, snapshot: LoanSnapshot) -> Result<LoanId, LedgerError> {
        let mut guard = self.records.lock().expect("ledger mutex poisoned");

        // v4 identifiers do not realistically collide; regenerating
        // under the lock still keeps the uniqueness invariant absolute.
        let mut loan_id = LoanId::generate();
        while guard.contains_key(&loan_id) {
            loan_id = LoanId::generate();
        }

        guard.insert(
            loan_id.clone(),
            LoanRecord {
                loan_id: loan_id.clone(),
                recorded_at: Utc::now(),
                snapshot,
            },
        );
        Ok(loan_id)
    }

    fn fetch(&self, id: &LoanId) -> Result<Option<LoanRecord>, LedgerError> {
        let guard = self.records.lock().expect("ledger mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(crate) fn parse_frequency(raw: &str) -> Result<PayFrequency, String> {
    PayFrequency::parse(raw).map_err(|err| err.to_string())
}
