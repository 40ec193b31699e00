//! Summarize Route

use alert_classifier::{classify, Summary};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::SummarizeError;
use crate::logging::AlertLog;
use crate::request::AlertRequest;
use crate::AppState;

/// Success envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlertSummary {
    pub summary: Summary,
}

/// Parse, validate and classify a request body
pub fn summarize_body(body: &[u8]) -> Result<AlertSummary, SummarizeError> {
    let request = AlertRequest::from_json(body)?;
    Ok(AlertSummary {
        summary: classify(&request.alert),
    })
}

/// Full request cycle over an already-buffered body
pub fn handle(body: Result<Bytes, BytesRejection>, log: &dyn AlertLog) -> Response {
    log.info("Processing alert summarization request");

    let outcome = body
        .map_err(|rejection| SummarizeError::Internal(rejection.body_text()))
        .and_then(|bytes| summarize_body(&bytes));

    match outcome {
        Ok(summary) => {
            log.info("Alert summarization completed successfully");
            Json(summary).into_response()
        }
        Err(err) => {
            err.log_to(log);
            err.into_response()
        }
    }
}

/// `POST` handler for the summarize function
pub async fn summarize_alert(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    handle(body, state.log.as_ref())
}
