//! Submission log handlers

use axum::{extract::State, Json};

use crate::logic::submissions::{LogStats, SubmissionRecord};
use crate::{AppError, AppResult, AppState};

/// All recorded submissions, in submission order.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<SubmissionRecord>>> {
    let log = state.log.clone();
    let rows = tokio::task::spawn_blocking(move || log.read_all())
        .await
        .map_err(|e| AppError::Internal(format!("read task failed: {}", e)))??;

    Ok(Json(rows))
}

/// Row count and size of the submission store.
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<LogStats>> {
    let log = state.log.clone();
    let stats = tokio::task::spawn_blocking(move || log.stats())
        .await
        .map_err(|e| AppError::Internal(format!("stats task failed: {}", e)))??;

    Ok(Json(stats))
}
