use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use salary_advance::advance::{
    AdvanceOutcome, AdvanceRequest, AdvanceService, DecisionStatus, LedgerError, LoanId,
    LoanLedger, LoanRecord, LoanSnapshot, PayFrequency, SCHEDULE_FILENAME,
};

#[derive(Default)]
struct MemoryLedger {
    records: Mutex<HashMap<LoanId, LoanRecord>>,
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

fn service() -> AdvanceService<MemoryLedger> {
    AdvanceService::new(Arc::new(MemoryLedger::default()))
}

fn decision_of(outcome: AdvanceOutcome) -> salary_advance::advance::AdvanceDecision {
    match outcome {
        AdvanceOutcome::Decision(decision) => decision,
        AdvanceOutcome::Export(export) => panic!("expected decision, got export {export:?}"),
    }
}

#[test]
fn monthly_earner_with_headroom_is_approved() {
    let service = service();
    let request = AdvanceRequest {
        gross_salary: 4000.0,
        pay_frequency: PayFrequency::Monthly,
        advance_amount: 1000.0,
        loan_amount: None,
        interest_rate: None,
        loan_term: None,
        include_amortization: false,
    };

    let decision = decision_of(service.process(request, false).expect("decision computes"));

    assert!(decision.eligible);
    assert!(decision.advance_approved);
    assert_eq!(decision.max_advance, 2000.0);
    assert_eq!(decision.approved_amount, 1000.0);
    assert_eq!(decision.fee, 50.0);
    assert!(decision.total_repayable.is_none());
    assert!(decision.amortization_schedule.is_none());
    assert!(decision.loan_id.is_some());
}

#[test]
fn below_threshold_salary_ends_ineligible_immediately() {
    let service = service();
    let request = AdvanceRequest {
        gross_salary: 500.0,
        pay_frequency: PayFrequency::Monthly,
        advance_amount: 100.0,
        loan_amount: None,
        interest_rate: None,
        loan_term: None,
        include_amortization: false,
    };

    let decision = decision_of(service.process(request, false).expect("decision computes"));

    assert_eq!(decision.status(), DecisionStatus::Ineligible);
    assert!(!decision.advance_approved);
    assert_eq!(decision.max_advance, 0.0);
    assert_eq!(decision.approved_amount, 0.0);
    assert_eq!(decision.fee, 0.0);
    assert!(decision.loan_id.is_none());
}

#[test]
fn annual_salary_is_divided_before_the_threshold_applies() {
    let service = service();
    // 18k/year is 1.5k/month; the cap lands at 750.
    let request = AdvanceRequest {
        gross_salary: 18_000.0,
        pay_frequency: PayFrequency::Annually,
        advance_amount: 800.0,
        loan_amount: None,
        interest_rate: None,
        loan_term: None,
        include_amortization: false,
    };

    let decision = decision_of(service.process(request, false).expect("decision computes"));

    assert!(decision.eligible);
    assert_eq!(decision.status(), DecisionStatus::Rejected);
    assert_eq!(decision.max_advance, 750.0);
}

#[test]
fn full_loan_flow_round_trips_through_the_ledger() {
    let service = service();
    let request = AdvanceRequest {
        gross_salary: 4000.0,
        pay_frequency: PayFrequency::Monthly,
        advance_amount: 1000.0,
        loan_amount: Some(1000.0),
        interest_rate: Some(12.0),
        loan_term: Some(12),
        include_amortization: true,
    };

    let decision = decision_of(service.process(request, false).expect("decision computes"));

    assert_eq!(decision.status(), DecisionStatus::ApprovedWithLoan);
    assert_eq!(decision.total_repayable, Some(1126.83));

    let schedule = decision
        .amortization_schedule
        .as_deref()
        .expect("schedule included");
    assert_eq!(schedule.len(), 12);
    assert_eq!(schedule.last().expect("nonempty schedule").balance, 0.0);
    let principal_sum: f64 = schedule.iter().map(|row| row.principal).sum();
    assert!((principal_sum - 1000.0).abs() < 0.01);

    let loan_id = decision.loan_id.expect("approval records a loan");
    let record = service.lookup(&loan_id).expect("recorded loan resolves");
    assert_eq!(record.snapshot.loan_amount, Some(1000.0));
    assert_eq!(record.snapshot.loan_term, Some(12));
    assert_eq!(record.snapshot.total_repayable, Some(1126.83));
    assert_eq!(
        record
            .snapshot
            .amortization_schedule
            .as_deref()
            .map(<[_]>::len),
        Some(12)
    );
}

#[test]
fn export_mode_yields_the_csv_document() {
    let service = service();
    let request = AdvanceRequest {
        gross_salary: 4000.0,
        pay_frequency: PayFrequency::Monthly,
        advance_amount: 1000.0,
        loan_amount: Some(1000.0),
        interest_rate: Some(12.0),
        loan_term: Some(12),
        include_amortization: false,
    };

    match service.process(request, true).expect("export computes") {
        AdvanceOutcome::Export(export) => {
            assert_eq!(export.filename, SCHEDULE_FILENAME);
            let lines: Vec<&str> = export.csv_data.lines().collect();
            assert_eq!(lines[0], "Month,Payment,Principal,Interest,Balance");
            assert_eq!(lines.len(), 13);
        }
        AdvanceOutcome::Decision(decision) => panic!("expected export, got {decision:?}"),
    }
}

#[test]
fn unknown_loan_id_is_not_found() {
    let service = service();
    let missing = LoanId("not-recorded".to_string());
    assert!(service.lookup(&missing).is_err());
}
