//! Premium model gateway.
//!
//! The statistical model is an external artefact; the pipeline relies only
//! on the [`PremiumModel`] contract so the model can be swapped, versioned
//! or stubbed without touching anything else.

pub mod inference;

use serde::Serialize;
use thiserror::Error;

use crate::logic::features::LayoutInfo;
use crate::models::applicant::InputRecord;

pub use inference::{ModelMetadata, OnnxPremiumModel};

/// Gateway failure taxonomy. No retries: every failure surfaces straight to
/// the caller.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("premium model is not loaded")]
    NotLoaded,
    #[error("prediction timed out after {0} ms")]
    Timeout(u64),
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("model produced an unusable estimate: {0}")]
    InvalidOutput(f32),
}

/// Engine state for the status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub model_path: Option<String>,
    pub model_checksum: Option<String>,
    pub inference_count: u64,
    pub avg_latency_ms: f32,
    pub layout: LayoutInfo,
}

/// Contract with the external statistical model: a fully validated record
/// in, a non-negative premium out.
pub trait PremiumModel: Send + Sync {
    fn predict(&self, record: &InputRecord) -> Result<f64, PredictionError>;

    fn status(&self) -> EngineStatus;
}
