use thiserror::Error;

use crate::models::validation::{BatchValidationError, Field};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("unknown sex: {0:?} (expected \"female\" or \"male\")")]
    UnknownSex(String),

    #[error("unknown risk region: {0:?} (expected one of \"low\", \"moderate\", \"high\", \"very high\")")]
    UnknownRegion(String),

    #[error("risk region label {found:?} does not match the canonical label {expected:?}")]
    RegionLabelMismatch {
        found: String,
        expected: &'static str,
    },

    #[error("unknown cholesterol unit: {0:?} (expected \"mmol/L\" or \"mg/dL\")")]
    UnknownUnit(String),

    #[error("smoker value {0} must be 0 or 1")]
    InvalidSmoker(f64),

    #[error("column '{column}' has {found} values, expected {expected}")]
    ColumnLengthMismatch {
        column: Field,
        expected: usize,
        found: usize,
    },

    #[error("validation failed: {0}")]
    Validation(#[from] BatchValidationError),
}
