//! Inference Engine - ONNX Runtime Integration
//!
//! Loads and runs the ONNX premium model. The artefact is checksummed at
//! load time so the running model can be identified from the status
//! endpoint.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use chrono::{DateTime, Utc};
use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::RwLock;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::logic::features::{self, FEATURE_COUNT};
use crate::models::applicant::InputRecord;

use super::{EngineStatus, PredictionError, PremiumModel};

/// Load-time metadata for the status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub checksum_sha256: String,
    pub feature_version: u8,
    pub feature_count: usize,
    pub loaded_at: DateTime<Utc>,
}

/// ONNX-backed premium model. Starts empty; quotes fail with `NotLoaded`
/// until an artefact is loaded.
pub struct OnnxPremiumModel {
    session: RwLock<Option<Session>>,
    metadata: RwLock<Option<ModelMetadata>>,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl OnnxPremiumModel {
    pub fn new() -> Self {
        Self {
            session: RwLock::new(None),
            metadata: RwLock::new(None),
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        }
    }

    /// Load the model artefact and record its checksum.
    pub fn load(&self, model_path: &str) -> Result<ModelMetadata, PredictionError> {
        tracing::info!("Loading premium model from: {}", model_path);

        if !Path::new(model_path).exists() {
            return Err(PredictionError::Inference(format!(
                "model not found: {}",
                model_path
            )));
        }

        let bytes = fs::read(model_path)
            .map_err(|e| PredictionError::Inference(format!("failed to read model: {}", e)))?;
        let checksum = hex::encode(Sha256::digest(&bytes));

        let session = Session::builder()
            .map_err(|e| {
                PredictionError::Inference(format!("failed to create session builder: {}", e))
            })?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| PredictionError::Inference(format!("failed to set optimization: {}", e)))?
            .commit_from_memory(&bytes)
            .map_err(|e| PredictionError::Inference(format!("failed to load model: {}", e)))?;

        *self.session.write() = Some(session);

        let metadata = ModelMetadata {
            model_path: model_path.to_string(),
            checksum_sha256: checksum,
            feature_version: features::FEATURE_VERSION,
            feature_count: FEATURE_COUNT,
            loaded_at: Utc::now(),
        };
        *self.metadata.write() = Some(metadata.clone());

        tracing::info!("Premium model loaded (sha256 {})", metadata.checksum_sha256);
        Ok(metadata)
    }

    pub fn is_loaded(&self) -> bool {
        self.session.read().is_some()
    }

    pub fn metadata(&self) -> Option<ModelMetadata> {
        self.metadata.read().clone()
    }
}

impl Default for OnnxPremiumModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PremiumModel for OnnxPremiumModel {
    fn predict(&self, record: &InputRecord) -> Result<f64, PredictionError> {
        let start_time = Instant::now();

        let mut session_guard = self.session.write();
        let session = session_guard.as_mut().ok_or(PredictionError::NotLoaded)?;

        let features = features::scale(&features::encode(record));

        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), features.to_vec())
            .map_err(|e| PredictionError::Inference(format!("array error: {}", e)))?;

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| PredictionError::Inference("no output defined".to_string()))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| PredictionError::Inference(format!("tensor error: {}", e)))?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| PredictionError::Inference(format!("inference failed: {}", e)))?;

        let output = outputs
            .get(&output_name)
            .ok_or_else(|| PredictionError::Inference("no output".to_string()))?;

        let output_tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| PredictionError::Inference(format!("extract error: {}", e)))?;

        let raw = output_tensor
            .1
            .first()
            .copied()
            .ok_or_else(|| PredictionError::Inference("empty model output".to_string()))?;

        self.latency_sum_us
            .fetch_add(start_time.elapsed().as_micros() as u64, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);

        // The premium is a currency amount; anything else means the artefact
        // does not honor the contract.
        if !raw.is_finite() || raw < 0.0 {
            return Err(PredictionError::InvalidOutput(raw));
        }

        Ok(f64::from(raw))
    }

    fn status(&self) -> EngineStatus {
        let metadata = self.metadata();

        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 {
            (sum as f32 / count as f32) / 1000.0
        } else {
            0.0
        };

        EngineStatus {
            model_loaded: self.is_loaded(),
            model_path: metadata.as_ref().map(|m| m.model_path.clone()),
            model_checksum: metadata.as_ref().map(|m| m.checksum_sha256.clone()),
            inference_count: count,
            avg_latency_ms: avg,
            layout: features::LayoutInfo::current(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::applicant::{
        BmiCategory, EmploymentStatus, Gender, InsurancePlan, MaritalStatus, MedicalHistory,
        Region, SmokingStatus,
    };

    fn sample_record() -> InputRecord {
        InputRecord {
            age: 30,
            income_lakhs: 10.0,
            number_of_dependants: 1,
            genetical_risk: 2,
            insurance_plan: InsurancePlan::Bronze,
            employment_status: EmploymentStatus::Salaried,
            gender: Gender::Male,
            marital_status: MaritalStatus::Married,
            bmi_category: BmiCategory::Normal,
            smoking_status: SmokingStatus::NoSmoking,
            region: Region::Northwest,
            medical_history: MedicalHistory::NoDisease,
        }
    }

    #[test]
    fn unloaded_engine_rejects_predictions() {
        let engine = OnnxPremiumModel::new();

        assert!(!engine.is_loaded());
        assert!(matches!(
            engine.predict(&sample_record()),
            Err(PredictionError::NotLoaded)
        ));
    }

    #[test]
    fn missing_artefact_fails_load() {
        let engine = OnnxPremiumModel::new();

        let err = engine.load("does/not/exist.onnx").unwrap_err();
        assert!(err.to_string().contains("model not found"));
        assert!(!engine.is_loaded());
        assert!(engine.metadata().is_none());
    }

    #[test]
    fn status_reports_unloaded_state() {
        let engine = OnnxPremiumModel::new();
        let status = engine.status();

        assert!(!status.model_loaded);
        assert!(status.model_path.is_none());
        assert_eq!(status.inference_count, 0);
        assert_eq!(status.avg_latency_ms, 0.0);
        assert_eq!(status.layout.feature_count, FEATURE_COUNT);
    }
}
