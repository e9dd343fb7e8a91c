use crate::infra::InMemoryLoanLedger;
use clap::Args;
use salary_advance::advance::{
    AdvanceDecision, AdvanceOutcome, AdvanceRequest, AdvanceService, PayFrequency,
};
use salary_advance::error::AppError;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Gross salary for the demo applicant
    #[arg(long, default_value_t = 4000.0)]
    pub(crate) gross_salary: f64,
    /// Pay frequency (Weekly, Bi-Weekly, Monthly, Annually)
    #[arg(long, default_value = "Monthly", value_parser = crate::infra::parse_frequency)]
    pub(crate) pay_frequency: PayFrequency,
    /// Requested advance amount
    #[arg(long, default_value_t = 1000.0)]
    pub(crate) advance_amount: f64,
    /// Loan amount to quote alongside the advance
    #[arg(long)]
    pub(crate) loan_amount: Option<f64>,
    /// Annual interest rate in percent for the loan quote
    #[arg(long)]
    pub(crate) interest_rate: Option<f64>,
    /// Loan term in months for the loan quote
    #[arg(long)]
    pub(crate) loan_term: Option<u32>,
    /// Include the amortization schedule in the rendered decision
    #[arg(long)]
    pub(crate) include_amortization: bool,
    /// Write the amortization schedule CSV to this path
    #[arg(long)]
    pub(crate) export_csv: Option<PathBuf>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        gross_salary,
        pay_frequency,
        advance_amount,
        loan_amount,
        interest_rate,
        loan_term,
        include_amortization,
        export_csv,
    } = args;

    let request = AdvanceRequest {
        gross_salary,
        pay_frequency,
        advance_amount,
        loan_amount,
        interest_rate,
        loan_term,
        include_amortization,
    };

    let ledger = Arc::new(InMemoryLoanLedger::default());
    let service = AdvanceService::new(ledger);

    println!("Salary advance demo");
    println!(
        "Applicant: {} gross at {} cadence, requesting {:.2}",
        gross_salary,
        pay_frequency.label(),
        advance_amount
    );

    let export_requested = export_csv.is_some();
    let outcome = service.process(request, export_requested)?;

    let decision = match outcome {
        AdvanceOutcome::Export(export) => {
            let path = export_csv.unwrap_or_else(|| PathBuf::from(export.filename.clone()));
            std::fs::write(&path, export.csv_data.as_bytes())?;
            println!(
                "Amortization schedule written to {} ({} suggested download name)",
                path.display(),
                export.filename
            );
            return Ok(());
        }
        AdvanceOutcome::Decision(decision) => decision,
    };

    render_decision(&decision);

    if let Some(loan_id) = &decision.loan_id {
        let record = service.lookup(loan_id)?;
        match serde_json::to_string_pretty(&record) {
            Ok(json) => println!("\nLedger record:\n{json}"),
            Err(err) => println!("\nLedger record unavailable: {err}"),
        }
    }

    Ok(())
}

fn render_decision(decision: &AdvanceDecision) {
    println!("\nDecision: {}", decision.status().label());
    println!(
        "- Eligible: {} | Advance approved: {}",
        if decision.eligible { "yes" } else { "no" },
        if decision.advance_approved { "yes" } else { "no" }
    );
    println!(
        "- Max advance: {:.2} | Approved amount: {:.2} | Fee: {:.2}",
        decision.max_advance, decision.approved_amount, decision.fee
    );
    println!("- {}", decision.message);

    if let Some(total) = decision.total_repayable {
        println!("- Total repayable: {total:.2}");
    }
    if let Some(loan_id) = &decision.loan_id {
        println!("- Loan id: {}", loan_id.0);
    }

    if let Some(schedule) = decision.amortization_schedule.as_deref() {
        println!("\nAmortization schedule");
        for row in schedule {
            println!(
                "- month {:>3} | payment {:>10.2} | principal {:>10.2} | interest {:>8.2} | balance {:>10.2}",
                row.month, row.payment, row.principal, row.interest, row.balance
            );
        }
    }
}
