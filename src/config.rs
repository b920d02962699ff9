//! Configuration module

use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Path to the ONNX premium model artefact
    pub model_path: String,

    /// Path to the CSV submission store
    pub submissions_path: PathBuf,

    /// Upper bound on one quote pipeline run, in milliseconds
    pub predict_timeout_ms: u64,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            model_path: env::var("MODEL_PATH")
                .unwrap_or_else(|_| "models/premium.onnx".to_string()),

            submissions_path: env::var("SUBMISSIONS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_submissions_path()),

            predict_timeout_ms: env::var("PREDICT_TIMEOUT_MS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(5000),

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn default_submissions_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("premium-estimator")
        .join("submissions.csv")
}
