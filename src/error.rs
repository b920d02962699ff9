//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::logic::model::PredictionError;
use crate::logic::pipeline::SubmitError;
use crate::logic::schema::ValidationFailure;
use crate::logic::submissions::StorageError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Rejected submission: the field list goes back to the form
    Validation(ValidationFailure),

    // The model could not produce an estimate
    Prediction(PredictionError),

    // Submission store errors on the read endpoints
    Storage(StorageError),

    // Generic errors
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(failure) => {
                let status = StatusCode::BAD_REQUEST;
                let body = Json(json!({
                    "error": failure.to_string(),
                    "status": status.as_u16(),
                    "fields": failure.errors,
                }));
                (status, body).into_response()
            }
            AppError::Prediction(err) => {
                let status = match err {
                    PredictionError::NotLoaded => StatusCode::SERVICE_UNAVAILABLE,
                    PredictionError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                    _ => StatusCode::BAD_GATEWAY,
                };
                let body = Json(json!({
                    "error": err.to_string(),
                    "status": status.as_u16(),
                }));
                (status, body).into_response()
            }
            AppError::Storage(err) => {
                tracing::error!("Submission store error: {}", err);
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = Json(json!({
                    "error": "Submission store error occurred",
                    "status": status.as_u16(),
                }));
                (status, body).into_response()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = Json(json!({
                    "error": "Internal server error",
                    "status": status.as_u16(),
                }));
                (status, body).into_response()
            }
        }
    }
}

impl From<ValidationFailure> for AppError {
    fn from(err: ValidationFailure) -> Self {
        AppError::Validation(err)
    }
}

impl From<PredictionError> for AppError {
    fn from(err: PredictionError) -> Self {
        AppError::Prediction(err)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err)
    }
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Validation(v) => AppError::Validation(v),
            SubmitError::Prediction(p) => AppError::Prediction(p),
        }
    }
}
