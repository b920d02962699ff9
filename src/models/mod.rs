//! Data models

pub mod applicant;
pub mod quote;

pub use applicant::*;
pub use quote::*;
