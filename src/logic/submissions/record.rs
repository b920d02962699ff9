//! One persisted submission row.

use serde::{Deserialize, Serialize};

use crate::models::applicant::{
    BmiCategory, EmploymentStatus, Gender, InputRecord, InsurancePlan, MaritalStatus,
    MedicalHistory, Region, SmokingStatus,
};

/// An applicant record plus the premium it was quoted, in spreadsheet
/// column order. Serde renames are the store's column headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Income in Lakhs")]
    pub income_lakhs: f64,
    #[serde(rename = "Number of Dependants")]
    pub number_of_dependants: u8,
    #[serde(rename = "Genetical Risk")]
    pub genetical_risk: u8,
    #[serde(rename = "Insurance Plan")]
    pub insurance_plan: InsurancePlan,
    #[serde(rename = "Employment Status")]
    pub employment_status: EmploymentStatus,
    #[serde(rename = "Gender")]
    pub gender: Gender,
    #[serde(rename = "Marital Status")]
    pub marital_status: MaritalStatus,
    #[serde(rename = "BMI Category")]
    pub bmi_category: BmiCategory,
    #[serde(rename = "Smoking Status")]
    pub smoking_status: SmokingStatus,
    #[serde(rename = "Region")]
    pub region: Region,
    #[serde(rename = "Medical History")]
    pub medical_history: MedicalHistory,
    #[serde(rename = "Predicted Premium")]
    pub predicted_premium: String,
}

impl SubmissionRecord {
    /// Store header, fixed and identical across all rows.
    pub const HEADERS: [&'static str; 13] = [
        "Age",
        "Income in Lakhs",
        "Number of Dependants",
        "Genetical Risk",
        "Insurance Plan",
        "Employment Status",
        "Gender",
        "Marital Status",
        "BMI Category",
        "Smoking Status",
        "Region",
        "Medical History",
        "Predicted Premium",
    ];

    pub fn new(record: &InputRecord, predicted_premium: String) -> Self {
        Self {
            age: record.age,
            income_lakhs: record.income_lakhs,
            number_of_dependants: record.number_of_dependants,
            genetical_risk: record.genetical_risk,
            insurance_plan: record.insurance_plan,
            employment_status: record.employment_status,
            gender: record.gender,
            marital_status: record.marital_status,
            bmi_category: record.bmi_category,
            smoking_status: record.smoking_status,
            region: record.region,
            medical_history: record.medical_history,
            predicted_premium,
        }
    }
}
