//! Engine status handler

use axum::{extract::State, Json};

use crate::logic::model::EngineStatus;
use crate::AppState;

/// Premium model state: loaded artefact, checksum, inference metrics, and
/// the feature layout the service encodes against.
pub async fn status(State(state): State<AppState>) -> Json<EngineStatus> {
    Json(state.model.status())
}
