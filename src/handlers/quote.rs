//! Quote handler

use std::time::Duration;

use axum::{extract::State, Json};
use uuid::Uuid;

use crate::logic::model::PredictionError;
use crate::logic::pipeline;
use crate::models::applicant::QuoteRequest;
use crate::models::quote::QuoteResponse;
use crate::{AppError, AppResult, AppState};

/// Price one submission and append it to the submission log.
///
/// Inference is synchronous, so the pipeline runs on a blocking worker
/// bounded by the configured deadline. The deadline only stops the wait:
/// there is no cancellation, a late result may still land in the log.
pub async fn create(
    State(state): State<AppState>,
    Json(raw): Json<QuoteRequest>,
) -> AppResult<Json<QuoteResponse>> {
    let model = state.model.clone();
    let log = state.log.clone();
    let timeout_ms = state.config.predict_timeout_ms;

    let task = tokio::task::spawn_blocking(move || pipeline::submit(model.as_ref(), &log, &raw));
    let outcome = match tokio::time::timeout(Duration::from_millis(timeout_ms), task).await {
        Err(_) => return Err(AppError::from(PredictionError::Timeout(timeout_ms))),
        Ok(Err(join_err)) => {
            return Err(AppError::Internal(format!("quote task failed: {}", join_err)))
        }
        Ok(Ok(result)) => result?,
    };

    let quote_id = Uuid::new_v4();
    if let Some(e) = &outcome.storage_error {
        tracing::warn!(%quote_id, "submission not persisted: {}", e);
    }

    Ok(Json(QuoteResponse {
        quote_id,
        premium: outcome.premium,
        formatted_premium: outcome.record.predicted_premium.clone(),
        persisted: outcome.storage_error.is_none(),
        storage_warning: outcome.storage_error.map(|e| e.to_string()),
    }))
}
