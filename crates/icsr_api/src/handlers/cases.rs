use std::collections::BTreeMap;

use axum::{extract::State, http::StatusCode, Json};
use icsr_core::{FieldId, IntakeSession};
use icsr_service::{IcsrError, SubmissionOutcome, SubmissionReceipt};
use serde::Serialize;

use crate::AppState;

/// Body of every 4xx/5xx answer from `POST /cases`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub error: String,
    /// Selections that must be made before the case can be submitted.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pending: Vec<FieldId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<String>,
}

impl Feedback {
    fn message(error: impl Into<String>) -> Self {
        Self { error: error.into(), pending: Vec::new(), field_errors: Vec::new() }
    }
}

type Rejection = (StatusCode, Json<Feedback>);

/// Takes a form (field path -> raw value), runs the submit pipeline and
/// answers with the receipt. Invalid cases are still accepted and exported;
/// their classification says so.
pub async fn submit_case(
    State(state): State<AppState>,
    Json(form): Json<BTreeMap<String, String>>,
) -> Result<(StatusCode, Json<SubmissionReceipt>), Rejection> {
    // 1. Fill a fresh session
    let mut session = IntakeSession::new();
    if let Err(errors) = session.apply_form(form.iter().map(|(path, raw)| (path.as_str(), raw.as_str()))) {
        let mut feedback = Feedback::message("Form contains invalid entries");
        feedback.field_errors = errors.iter().map(ToString::to_string).collect();
        return Err((StatusCode::UNPROCESSABLE_ENTITY, Json(feedback)));
    }

    // 2. Submit off the async runtime: export writes to disk
    let service = state.service.clone();
    let outcome = tokio::task::spawn_blocking(move || service.submit(&mut session))
        .await
        .map_err(|e| {
            tracing::error!("submit task failed: {:?}", e);
            internal_error()
        })?;

    match outcome {
        Ok(SubmissionOutcome::Submitted(receipt)) => Ok((StatusCode::CREATED, Json(receipt))),
        Ok(SubmissionOutcome::Rejected { pending }) => {
            let mut feedback = Feedback::message("Required selections are missing");
            feedback.pending = pending;
            Err((StatusCode::UNPROCESSABLE_ENTITY, Json(feedback)))
        }
        Err(IcsrError::Session(e)) => Err((StatusCode::UNPROCESSABLE_ENTITY, Json(Feedback::message(e.to_string())))),
        Err(IcsrError::Export(e)) => {
            tracing::error!("case report export failed: {}", e);
            Err(internal_error())
        }
    }
}

fn internal_error() -> Rejection {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(Feedback::message("Internal server error")))
}
