//! Boundary validation for quote submissions.
//!
//! Every raw field is checked against its declared domain before anything
//! downstream sees it. Violations are collected, all of them, in form
//! order, so the form can mark every bad field in one round trip.

use serde::Serialize;
use validator::Validate;

use crate::models::applicant::{
    BmiCategory, Categorical, EmploymentStatus, Gender, InputRecord, InsurancePlan, MaritalStatus,
    MedicalHistory, QuoteRequest, Region, SmokingStatus,
};

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

/// The full set of violations for one submission.
#[derive(Debug, Clone)]
pub struct ValidationFailure {
    pub errors: Vec<FieldError>,
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.errors.iter().map(|e| e.field).collect();
        write!(f, "{} invalid field(s): {}", self.errors.len(), fields.join(", "))
    }
}

impl std::error::Error for ValidationFailure {}

/// Numeric fields in form order; the order in which their violations are
/// reported.
const NUMERIC_ORDER: [&str; 4] = ["age", "income_lakhs", "number_of_dependants", "genetical_risk"];

fn categorical<T: Categorical>(
    field: &'static str,
    value: &str,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    match T::parse(value) {
        Some(v) => Some(v),
        None => {
            errors.push(FieldError {
                field,
                reason: format!(
                    "unknown value '{}', expected one of: {}",
                    value,
                    T::options().join(", ")
                ),
            });
            None
        }
    }
}

/// Validate a raw submission against the feature schema.
///
/// Total and side-effect free: either every field is in-domain and a typed
/// [`InputRecord`] comes back, or the complete violation list does.
pub fn validate(raw: &QuoteRequest) -> Result<InputRecord, ValidationFailure> {
    let mut errors = Vec::new();

    if let Err(failures) = raw.validate() {
        let by_field = failures.field_errors();
        for field in NUMERIC_ORDER {
            if let Some(list) = by_field.get(field) {
                let reason = list
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "out of range".to_string());
                errors.push(FieldError { field, reason });
            }
        }
    }

    let insurance_plan = categorical::<InsurancePlan>("insurance_plan", &raw.insurance_plan, &mut errors);
    let employment_status =
        categorical::<EmploymentStatus>("employment_status", &raw.employment_status, &mut errors);
    let gender = categorical::<Gender>("gender", &raw.gender, &mut errors);
    let marital_status =
        categorical::<MaritalStatus>("marital_status", &raw.marital_status, &mut errors);
    let bmi_category = categorical::<BmiCategory>("bmi_category", &raw.bmi_category, &mut errors);
    let smoking_status =
        categorical::<SmokingStatus>("smoking_status", &raw.smoking_status, &mut errors);
    let region = categorical::<Region>("region", &raw.region, &mut errors);
    let medical_history =
        categorical::<MedicalHistory>("medical_history", &raw.medical_history, &mut errors);

    match (
        insurance_plan,
        employment_status,
        gender,
        marital_status,
        bmi_category,
        smoking_status,
        region,
        medical_history,
    ) {
        (
            Some(insurance_plan),
            Some(employment_status),
            Some(gender),
            Some(marital_status),
            Some(bmi_category),
            Some(smoking_status),
            Some(region),
            Some(medical_history),
        ) if errors.is_empty() => Ok(InputRecord {
            age: raw.age as u32,
            income_lakhs: raw.income_lakhs,
            number_of_dependants: raw.number_of_dependants as u8,
            genetical_risk: raw.genetical_risk as u8,
            insurance_plan,
            employment_status,
            gender,
            marital_status,
            bmi_category,
            smoking_status,
            region,
            medical_history,
        }),
        _ => Err(ValidationFailure { errors }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> QuoteRequest {
        QuoteRequest {
            age: 30,
            income_lakhs: 10.0,
            number_of_dependants: 1,
            genetical_risk: 2,
            insurance_plan: "Gold".into(),
            employment_status: "Self-Employed".into(),
            gender: "Female".into(),
            marital_status: "Married".into(),
            bmi_category: "Normal".into(),
            smoking_status: "No Smoking".into(),
            region: "Southeast".into(),
            medical_history: "Diabetes & Heart Disease".into(),
        }
    }

    #[test]
    fn accepts_in_domain_values_unchanged() {
        let record = validate(&valid_request()).unwrap();

        assert_eq!(record.age, 30);
        assert_eq!(record.income_lakhs, 10.0);
        assert_eq!(record.number_of_dependants, 1);
        assert_eq!(record.genetical_risk, 2);
        assert_eq!(record.insurance_plan, InsurancePlan::Gold);
        assert_eq!(record.employment_status, EmploymentStatus::SelfEmployed);
        assert_eq!(record.gender, Gender::Female);
        assert_eq!(record.marital_status, MaritalStatus::Married);
        assert_eq!(record.bmi_category, BmiCategory::Normal);
        assert_eq!(record.smoking_status, SmokingStatus::NoSmoking);
        assert_eq!(record.region, Region::Southeast);
        assert_eq!(record.medical_history, MedicalHistory::DiabetesAndHeartDisease);
    }

    #[test]
    fn accepts_range_endpoints() {
        for (age, income, dependants, risk) in [(18, 0.0, 0, 0), (100, 200.0, 20, 5)] {
            let mut raw = valid_request();
            raw.age = age;
            raw.income_lakhs = income;
            raw.number_of_dependants = dependants;
            raw.genetical_risk = risk;

            let record = validate(&raw).unwrap();
            assert_eq!(record.age, age as u32);
            assert_eq!(record.income_lakhs, income);
        }
    }

    #[test]
    fn rejects_age_below_minimum() {
        let mut raw = valid_request();
        raw.age = 17;

        let failure = validate(&raw).unwrap_err();
        assert_eq!(failure.errors.len(), 1);
        assert_eq!(failure.errors[0].field, "age");
    }

    #[test]
    fn rejects_age_above_maximum() {
        let mut raw = valid_request();
        raw.age = 101;

        let failure = validate(&raw).unwrap_err();
        assert_eq!(failure.errors[0].field, "age");
    }

    #[test]
    fn rejects_income_above_maximum() {
        let mut raw = valid_request();
        raw.income_lakhs = 200.5;

        let failure = validate(&raw).unwrap_err();
        assert_eq!(failure.errors[0].field, "income_lakhs");
    }

    #[test]
    fn rejects_genetical_risk_above_maximum() {
        let mut raw = valid_request();
        raw.genetical_risk = 6;

        let failure = validate(&raw).unwrap_err();
        assert_eq!(failure.errors[0].field, "genetical_risk");
    }

    #[test]
    fn rejects_unknown_insurance_plan() {
        let mut raw = valid_request();
        raw.insurance_plan = "Platinum".into();

        let failure = validate(&raw).unwrap_err();
        assert_eq!(failure.errors.len(), 1);
        assert_eq!(failure.errors[0].field, "insurance_plan");
        assert!(failure.errors[0].reason.contains("Platinum"));
        assert!(failure.errors[0].reason.contains("Bronze, Silver, Gold"));
    }

    #[test]
    fn rejects_each_unknown_categorical() {
        let cases: [(&str, fn(&mut QuoteRequest)); 7] = [
            ("employment_status", |r| r.employment_status = "Retired".into()),
            ("gender", |r| r.gender = "Other".into()),
            ("marital_status", |r| r.marital_status = "Divorced".into()),
            ("bmi_category", |r| r.bmi_category = "Athletic".into()),
            ("smoking_status", |r| r.smoking_status = "Heavy".into()),
            ("region", |r| r.region = "Central".into()),
            ("medical_history", |r| r.medical_history = "Asthma".into()),
        ];

        for (field, tweak) in cases {
            let mut raw = valid_request();
            tweak(&mut raw);

            let failure = validate(&raw).unwrap_err();
            assert_eq!(failure.errors.len(), 1, "field {}", field);
            assert_eq!(failure.errors[0].field, field);
        }
    }

    #[test]
    fn collects_all_violations_in_form_order() {
        let mut raw = valid_request();
        raw.age = 17;
        raw.genetical_risk = 9;
        raw.insurance_plan = "Platinum".into();
        raw.region = "Mars".into();

        let failure = validate(&raw).unwrap_err();
        let fields: Vec<&str> = failure.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["age", "genetical_risk", "insurance_plan", "region"]);
    }

    #[test]
    fn case_sensitive_domain_membership() {
        let mut raw = valid_request();
        raw.gender = "female".into();

        let failure = validate(&raw).unwrap_err();
        assert_eq!(failure.errors[0].field, "gender");
    }
}
