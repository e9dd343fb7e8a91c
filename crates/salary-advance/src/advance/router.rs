use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::ledger::{LedgerError, LoanId, LoanLedger};
use super::service::{AdvanceOutcome, AdvanceRequest, AdvanceService, AdvanceServiceError};

/// Body accepted by the compute endpoint: the advance request plus the
/// export flag the form submits alongside it.
#[derive(Debug, Deserialize)]
pub(crate) struct ComputeAdvanceBody {
    #[serde(flatten)]
    pub(crate) request: AdvanceRequest,
    #[serde(default)]
    pub(crate) export_csv: bool,
}

/// Router builder exposing the decision and lookup endpoints.
pub fn advance_router<L>(service: Arc<AdvanceService<L>>) -> Router
where
    L: LoanLedger + 'static,
{
    Router::new()
        .route("/api/v1/advance/compute", post(compute_handler::<L>))
        .route("/api/v1/advance/loans/:loan_id", get(loan_handler::<L>))
        .with_state(service)
}

pub(crate) async fn compute_handler<L>(
    State(service): State<Arc<AdvanceService<L>>>,
    axum::Json(body): axum::Json<ComputeAdvanceBody>,
) -> Response
where
    L: LoanLedger + 'static,
{
    match service.process(body.request, body.export_csv) {
        Ok(AdvanceOutcome::Decision(decision)) => {
            (StatusCode::OK, axum::Json(decision)).into_response()
        }
        Ok(AdvanceOutcome::Export(export)) => {
            (StatusCode::OK, axum::Json(export)).into_response()
        }
        Err(AdvanceServiceError::Loan(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn loan_handler<L>(
    State(service): State<Arc<AdvanceService<L>>>,
    Path(loan_id): Path<String>,
) -> Response
where
    L: LoanLedger + 'static,
{
    let id = LoanId(loan_id);
    match service.lookup(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(AdvanceServiceError::Ledger(LedgerError::NotFound)) => {
            let payload = json!({
                "error": "loan not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

/// Internal detail stays in the logs; the caller sees a generic body.
fn internal_error(error: AdvanceServiceError) -> Response {
    tracing::error!(%error, "advance request failed");
    let payload = json!({
        "error": "internal server error",
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
