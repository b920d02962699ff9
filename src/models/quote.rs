//! Quote DTOs and premium formatting

use serde::Serialize;
use uuid::Uuid;

use super::applicant::NumericField;

/// Response for a priced quote. `persisted` is false when the premium was
/// computed but the submission store rejected the append.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub quote_id: Uuid,
    pub premium: f64,
    pub formatted_premium: String,
    pub persisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_warning: Option<String>,
}

/// The form contract: every field the quote form renders, with its domain.
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub numeric: Vec<NumericField>,
    pub categorical: Vec<CategoricalField>,
}

#[derive(Debug, Serialize)]
pub struct CategoricalField {
    pub field: &'static str,
    pub options: Vec<&'static str>,
}

/// Format a premium the way the form displays it: rupee sign, thousands
/// grouping, two decimals.
pub fn format_inr(amount: f64) -> String {
    let fixed = format!("{:.2}", amount);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (fixed.as_str(), "00"),
    };

    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut reversed = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            reversed.push(',');
        }
        reversed.push(c);
    }
    let grouped: String = reversed.chars().rev().collect();

    format!("₹ {}{}.{}", sign, grouped, frac_part)
}
