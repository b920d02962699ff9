//! Feature Layout - the contract between the pipeline and the model
//!
//! **This module controls the model input schema**
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Change a code or a bound → increment FEATURE_VERSION
//!
//! The layout hash is surfaced on the engine status endpoint so a model
//! artefact trained against a different layout can be spotted at runtime.

use crc32fast::Hasher;
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::models::applicant::InputRecord;

/// Current feature layout version.
pub const FEATURE_VERSION: u8 = 1;

/// Feature names in the exact order the model expects them.
pub const FEATURE_LAYOUT: &[&str] = &[
    "age",                  // 0: years, 18-100
    "income_lakhs",         // 1: annual income in lakhs, 0-200
    "number_of_dependants", // 2: 0-20
    "genetical_risk",       // 3: 0 (low) - 5 (high)
    "insurance_plan",       // 4: ordinal, Bronze < Silver < Gold
    "employment_status",    // 5: ordinal code
    "gender",               // 6: ordinal code
    "marital_status",       // 7: ordinal code
    "bmi_category",         // 8: ordinal code
    "smoking_status",       // 9: ordinal code
    "region",               // 10: ordinal code
    "medical_history",      // 11: ordinal code
];

/// Total number of features.
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 12;

/// Per-feature (min, max) used for scaling, aligned with FEATURE_LAYOUT.
/// Categorical features span their ordinal code range.
pub const FEATURE_BOUNDS: [(f32, f32); FEATURE_COUNT] = [
    (18.0, 100.0), // age
    (0.0, 200.0),  // income_lakhs
    (0.0, 20.0),   // number_of_dependants
    (0.0, 5.0),    // genetical_risk
    (0.0, 2.0),    // insurance_plan
    (0.0, 2.0),    // employment_status
    (0.0, 1.0),    // gender
    (0.0, 1.0),    // marital_status
    (0.0, 3.0),    // bmi_category
    (0.0, 2.0),    // smoking_status
    (0.0, 3.0),    // region
    (0.0, 8.0),    // medical_history
];

static LAYOUT_HASH: Lazy<u32> = Lazy::new(compute_layout_hash);

/// Compute the CRC32 hash of the feature layout.
fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Layout hash, computed once.
pub fn layout_hash() -> u32 {
    *LAYOUT_HASH
}

/// Encode a validated record into the model's feature order. Numerics as-is,
/// categoricals as their declared-order ordinal code; matches the label
/// encoding of the training pipeline.
pub fn encode(record: &InputRecord) -> [f32; FEATURE_COUNT] {
    [
        record.age as f32,
        record.income_lakhs as f32,
        record.number_of_dependants as f32,
        record.genetical_risk as f32,
        record.insurance_plan as u8 as f32,
        record.employment_status as u8 as f32,
        record.gender as u8 as f32,
        record.marital_status as u8 as f32,
        record.bmi_category as u8 as f32,
        record.smoking_status as u8 as f32,
        record.region as u8 as f32,
        record.medical_history as u8 as f32,
    ]
}

/// Min/max scale every feature into [0, 1], clamped. The model is trained
/// on scaled inputs.
pub fn scale(features: &[f32; FEATURE_COUNT]) -> [f32; FEATURE_COUNT] {
    let mut scaled = [0.0f32; FEATURE_COUNT];

    for i in 0..FEATURE_COUNT {
        let (min_val, max_val) = FEATURE_BOUNDS[i];
        let range = (max_val - min_val).max(1e-8);

        scaled[i] = ((features[i] - min_val) / range).clamp(0.0, 1.0);
    }

    scaled
}

/// Complete layout information for the engine status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}
