//! The quote pipeline: validate, predict, format, append.

use thiserror::Error;

use crate::logic::model::{PredictionError, PremiumModel};
use crate::logic::schema::{self, ValidationFailure};
use crate::logic::submissions::{StorageError, SubmissionLog, SubmissionRecord};
use crate::models::applicant::QuoteRequest;
use crate::models::quote::format_inr;

/// Failures that abort a submission before anything is persisted.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

/// Result of one accepted submission. A storage failure does not void the
/// quote: the premium still comes back, the failure rides alongside.
#[derive(Debug)]
pub struct QuoteOutcome {
    pub premium: f64,
    pub record: SubmissionRecord,
    pub storage_error: Option<StorageError>,
}

/// Run one submission end to end. The record is appended only after a
/// successful prediction; validation and prediction failures leave the
/// store untouched.
pub fn submit(
    model: &dyn PremiumModel,
    log: &SubmissionLog,
    raw: &QuoteRequest,
) -> Result<QuoteOutcome, SubmitError> {
    let record = schema::validate(raw)?;
    let premium = model.predict(&record)?;

    let row = SubmissionRecord::new(&record, format_inr(premium));

    let storage_error = log.append(&row).err();
    if let Some(e) = &storage_error {
        tracing::error!("quote computed but not persisted: {}", e);
    }

    Ok(QuoteOutcome {
        premium,
        record: row,
        storage_error,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tempfile::tempdir;

    use super::*;
    use crate::logic::features::LayoutInfo;
    use crate::logic::model::EngineStatus;
    use crate::models::applicant::InputRecord;

    struct FixedModel(f64);

    impl PremiumModel for FixedModel {
        fn predict(&self, _record: &InputRecord) -> Result<f64, PredictionError> {
            Ok(self.0)
        }

        fn status(&self) -> EngineStatus {
            stub_status()
        }
    }

    struct FailingModel;

    impl PremiumModel for FailingModel {
        fn predict(&self, _record: &InputRecord) -> Result<f64, PredictionError> {
            Err(PredictionError::Inference("unsupported feature combination".into()))
        }

        fn status(&self) -> EngineStatus {
            stub_status()
        }
    }

    struct CountingModel {
        calls: AtomicUsize,
    }

    impl PremiumModel for CountingModel {
        fn predict(&self, _record: &InputRecord) -> Result<f64, PredictionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(0.0)
        }

        fn status(&self) -> EngineStatus {
            stub_status()
        }
    }

    fn stub_status() -> EngineStatus {
        EngineStatus {
            model_loaded: true,
            model_path: None,
            model_checksum: None,
            inference_count: 0,
            avg_latency_ms: 0.0,
            layout: LayoutInfo::current(),
        }
    }

    fn valid_request() -> QuoteRequest {
        QuoteRequest {
            age: 30,
            income_lakhs: 10.0,
            number_of_dependants: 1,
            genetical_risk: 2,
            insurance_plan: "Bronze".into(),
            employment_status: "Salaried".into(),
            gender: "Male".into(),
            marital_status: "Unmarried".into(),
            bmi_category: "Normal".into(),
            smoking_status: "No Smoking".into(),
            region: "Northwest".into(),
            medical_history: "No Disease".into(),
        }
    }

    #[test]
    fn end_to_end_formats_and_persists_the_premium() {
        let dir = tempdir().unwrap();
        let log = SubmissionLog::new(dir.path().join("submissions.csv"));
        let model = FixedModel(15000.0);

        let outcome = submit(&model, &log, &valid_request()).unwrap();

        assert_eq!(outcome.premium, 15000.0);
        assert_eq!(outcome.record.predicted_premium, "₹ 15,000.00");
        assert!(outcome.storage_error.is_none());

        let rows = log.read_all().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].predicted_premium, "₹ 15,000.00");
        assert_eq!(rows[0].age, 30);
    }

    #[test]
    fn prediction_failure_appends_nothing() {
        let dir = tempdir().unwrap();
        let log = SubmissionLog::new(dir.path().join("submissions.csv"));

        let err = submit(&FailingModel, &log, &valid_request()).unwrap_err();

        assert!(matches!(err, SubmitError::Prediction(_)));
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn validation_failure_never_reaches_the_model() {
        let dir = tempdir().unwrap();
        let log = SubmissionLog::new(dir.path().join("submissions.csv"));
        let model = CountingModel {
            calls: AtomicUsize::new(0),
        };

        let mut raw = valid_request();
        raw.age = 17;

        let err = submit(&model, &log, &raw).unwrap_err();

        assert!(matches!(err, SubmitError::Validation(_)));
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn storage_failure_still_returns_the_quote() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("submissions.csv");
        // A store with a foreign header: the append must fail, the quote must not.
        std::fs::write(&path, "Age,Plan\n30,Gold\n").unwrap();
        let log = SubmissionLog::new(path);

        let outcome = submit(&FixedModel(15000.0), &log, &valid_request()).unwrap();

        assert_eq!(outcome.record.predicted_premium, "₹ 15,000.00");
        assert!(outcome.storage_error.is_some());
    }
}
