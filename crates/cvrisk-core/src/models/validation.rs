use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A predictor column in a batched scoring request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Field {
    Sex,
    Age,
    TotalCholesterol,
    HdlCholesterol,
    SystolicBp,
    Smoker,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Sex => "sex",
            Field::Age => "age",
            Field::TotalCholesterol => "total_cholesterol",
            Field::HdlCholesterol => "hdl_cholesterol",
            Field::SystolicBp => "systolic_bp",
            Field::Smoker => "smoker",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One invalid value found while validating a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldError {
    /// Zero-based position of the record in the batch.
    pub record: usize,
    pub field: Field,
    /// The offending value as supplied, `None` when it was missing.
    pub value: Option<String>,
    pub message: String,
}

impl FieldError {
    pub fn missing(record: usize, field: Field) -> Self {
        Self {
            record,
            field,
            value: None,
            message: format!("record {record}: {field} is missing"),
        }
    }

    pub fn not_finite(record: usize, field: Field, value: f64) -> Self {
        Self {
            record,
            field,
            value: Some(value.to_string()),
            message: format!("record {record}: {field} {value} is not a finite number"),
        }
    }

    pub fn out_of_domain(record: usize, field: Field, value: impl Into<String>, reason: &str) -> Self {
        let value = value.into();
        Self {
            record,
            field,
            message: format!("record {record}: {field} {value:?} {reason}"),
            value: Some(value),
        }
    }
}

/// Every invalid field in a batch. The batch is rejected as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BatchValidationError {
    pub errors: Vec<FieldError>,
}

impl fmt::Display for BatchValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => f.write_str("no invalid fields"),
            [only] => f.write_str(&only.message),
            [first, rest @ ..] => write!(
                f,
                "{} (and {} more invalid field{})",
                first.message,
                rest.len(),
                if rest.len() == 1 { "" } else { "s" }
            ),
        }
    }
}

impl std::error::Error for BatchValidationError {}
