//! Applicant model
//!
//! The quote form collects four numeric fields and eight categorical
//! fields. `QuoteRequest` is the raw field map exactly as the form posts
//! it; `InputRecord` is the validated, typed version handed to the model
//! and the submission store.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Common surface of the categorical form domains.
///
/// Ordinal codes (the `as u8` cast) follow the declared variant order;
/// the model's label encoding depends on it.
pub trait Categorical: Copy + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    fn options() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsurancePlan {
    Bronze,
    Silver,
    Gold,
}

impl Categorical for InsurancePlan {
    const ALL: &'static [Self] = &[Self::Bronze, Self::Silver, Self::Gold];

    fn as_str(self) -> &'static str {
        match self {
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentStatus {
    Salaried,
    #[serde(rename = "Self-Employed")]
    SelfEmployed,
    Freelancer,
}

impl Categorical for EmploymentStatus {
    const ALL: &'static [Self] = &[Self::Salaried, Self::SelfEmployed, Self::Freelancer];

    fn as_str(self) -> &'static str {
        match self {
            Self::Salaried => "Salaried",
            Self::SelfEmployed => "Self-Employed",
            Self::Freelancer => "Freelancer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Categorical for Gender {
    const ALL: &'static [Self] = &[Self::Male, Self::Female];

    fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    Married,
    Unmarried,
}

impl Categorical for MaritalStatus {
    const ALL: &'static [Self] = &[Self::Married, Self::Unmarried];

    fn as_str(self) -> &'static str {
        match self {
            Self::Married => "Married",
            Self::Unmarried => "Unmarried",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Normal,
    Obesity,
    Overweight,
    Underweight,
}

impl Categorical for BmiCategory {
    const ALL: &'static [Self] = &[
        Self::Normal,
        Self::Obesity,
        Self::Overweight,
        Self::Underweight,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Obesity => "Obesity",
            Self::Overweight => "Overweight",
            Self::Underweight => "Underweight",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmokingStatus {
    #[serde(rename = "No Smoking")]
    NoSmoking,
    Regular,
    Occasional,
}

impl Categorical for SmokingStatus {
    const ALL: &'static [Self] = &[Self::NoSmoking, Self::Regular, Self::Occasional];

    fn as_str(self) -> &'static str {
        match self {
            Self::NoSmoking => "No Smoking",
            Self::Regular => "Regular",
            Self::Occasional => "Occasional",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    Northwest,
    Southeast,
    Northeast,
    Southwest,
}

impl Categorical for Region {
    const ALL: &'static [Self] = &[
        Self::Northwest,
        Self::Southeast,
        Self::Northeast,
        Self::Southwest,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Northwest => "Northwest",
            Self::Southeast => "Southeast",
            Self::Northeast => "Northeast",
            Self::Southwest => "Southwest",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MedicalHistory {
    #[serde(rename = "No Disease")]
    NoDisease,
    Diabetes,
    #[serde(rename = "High Blood Pressure")]
    HighBloodPressure,
    #[serde(rename = "Diabetes & High BP")]
    DiabetesAndHighBp,
    Thyroid,
    #[serde(rename = "Heart Disease")]
    HeartDisease,
    #[serde(rename = "BP & Heart Disease")]
    BpAndHeartDisease,
    #[serde(rename = "Diabetes & Thyroid")]
    DiabetesAndThyroid,
    #[serde(rename = "Diabetes & Heart Disease")]
    DiabetesAndHeartDisease,
}

impl Categorical for MedicalHistory {
    const ALL: &'static [Self] = &[
        Self::NoDisease,
        Self::Diabetes,
        Self::HighBloodPressure,
        Self::DiabetesAndHighBp,
        Self::Thyroid,
        Self::HeartDisease,
        Self::BpAndHeartDisease,
        Self::DiabetesAndThyroid,
        Self::DiabetesAndHeartDisease,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::NoDisease => "No Disease",
            Self::Diabetes => "Diabetes",
            Self::HighBloodPressure => "High Blood Pressure",
            Self::DiabetesAndHighBp => "Diabetes & High BP",
            Self::Thyroid => "Thyroid",
            Self::HeartDisease => "Heart Disease",
            Self::BpAndHeartDisease => "BP & Heart Disease",
            Self::DiabetesAndThyroid => "Diabetes & Thyroid",
            Self::DiabetesAndHeartDisease => "Diabetes & Heart Disease",
        }
    }
}

/// A fully validated submission. Constructed only by the schema validator;
/// every field is guaranteed in-domain.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRecord {
    pub age: u32,
    pub income_lakhs: f64,
    pub number_of_dependants: u8,
    pub genetical_risk: u8,
    pub insurance_plan: InsurancePlan,
    pub employment_status: EmploymentStatus,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub bmi_category: BmiCategory,
    pub smoking_status: SmokingStatus,
    pub region: Region,
    pub medical_history: MedicalHistory,
}

/// Raw quote submission as posted by the form. Categorical fields arrive as
/// plain strings; the schema validator turns them into typed variants.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuoteRequest {
    #[validate(range(min = 18, max = 100, message = "must be between 18 and 100"))]
    pub age: i64,
    #[validate(range(min = 0.0, max = 200.0, message = "must be between 0.0 and 200.0"))]
    pub income_lakhs: f64,
    #[validate(range(min = 0, max = 20, message = "must be between 0 and 20"))]
    pub number_of_dependants: i64,
    #[validate(range(min = 0, max = 5, message = "must be between 0 and 5"))]
    pub genetical_risk: i64,
    pub insurance_plan: String,
    pub employment_status: String,
    pub gender: String,
    pub marital_status: String,
    pub bmi_category: String,
    pub smoking_status: String,
    pub region: String,
    pub medical_history: String,
}

/// Bounds and form default for one numeric field.
#[derive(Debug, Clone, Serialize)]
pub struct NumericField {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

/// Numeric form fields in form order. Bounds mirror the `Validate` ranges
/// on [`QuoteRequest`]; defaults are what the form pre-fills.
pub const NUMERIC_FIELDS: [NumericField; 4] = [
    NumericField {
        field: "age",
        min: 18.0,
        max: 100.0,
        default: 30.0,
    },
    NumericField {
        field: "income_lakhs",
        min: 0.0,
        max: 200.0,
        default: 10.0,
    },
    NumericField {
        field: "number_of_dependants",
        min: 0.0,
        max: 20.0,
        default: 1.0,
    },
    NumericField {
        field: "genetical_risk",
        min: 0.0,
        max: 5.0,
        default: 2.0,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_serde_matches<T>()
    where
        T: Categorical + Serialize + std::fmt::Debug,
    {
        for v in T::ALL {
            let json = serde_json::to_value(v).unwrap();
            assert_eq!(
                json,
                serde_json::Value::String(v.as_str().to_string()),
                "serde name drifted from display name for {:?}",
                v
            );
        }
    }

    #[test]
    fn serde_names_match_display_names() {
        assert_serde_matches::<InsurancePlan>();
        assert_serde_matches::<EmploymentStatus>();
        assert_serde_matches::<Gender>();
        assert_serde_matches::<MaritalStatus>();
        assert_serde_matches::<BmiCategory>();
        assert_serde_matches::<SmokingStatus>();
        assert_serde_matches::<Region>();
        assert_serde_matches::<MedicalHistory>();
    }

    #[test]
    fn parse_round_trips_every_variant() {
        for v in MedicalHistory::ALL {
            assert_eq!(MedicalHistory::parse(v.as_str()), Some(*v));
        }
        for v in SmokingStatus::ALL {
            assert_eq!(SmokingStatus::parse(v.as_str()), Some(*v));
        }
        assert_eq!(InsurancePlan::parse("Platinum"), None);
        assert_eq!(Gender::parse("male"), None);
    }

    #[test]
    fn domain_sizes() {
        assert_eq!(InsurancePlan::ALL.len(), 3);
        assert_eq!(EmploymentStatus::ALL.len(), 3);
        assert_eq!(Gender::ALL.len(), 2);
        assert_eq!(MaritalStatus::ALL.len(), 2);
        assert_eq!(BmiCategory::ALL.len(), 4);
        assert_eq!(SmokingStatus::ALL.len(), 3);
        assert_eq!(Region::ALL.len(), 4);
        assert_eq!(MedicalHistory::ALL.len(), 9);
    }
}
