//! Form schema handler

use axum::Json;

use crate::models::applicant::{
    BmiCategory, Categorical, EmploymentStatus, Gender, InsurancePlan, MaritalStatus,
    MedicalHistory, Region, SmokingStatus, NUMERIC_FIELDS,
};
use crate::models::quote::{CategoricalField, SchemaResponse};

/// The form contract: every field the quote form renders, with its domain,
/// in form order.
pub async fn get() -> Json<SchemaResponse> {
    Json(SchemaResponse {
        numeric: NUMERIC_FIELDS.to_vec(),
        categorical: vec![
            CategoricalField {
                field: "insurance_plan",
                options: InsurancePlan::options(),
            },
            CategoricalField {
                field: "employment_status",
                options: EmploymentStatus::options(),
            },
            CategoricalField {
                field: "gender",
                options: Gender::options(),
            },
            CategoricalField {
                field: "marital_status",
                options: MaritalStatus::options(),
            },
            CategoricalField {
                field: "bmi_category",
                options: BmiCategory::options(),
            },
            CategoricalField {
                field: "smoking_status",
                options: SmokingStatus::options(),
            },
            CategoricalField {
                field: "region",
                options: Region::options(),
            },
            CategoricalField {
                field: "medical_history",
                options: MedicalHistory::options(),
            },
        ],
    })
}
