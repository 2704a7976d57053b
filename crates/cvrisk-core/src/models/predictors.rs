use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

use super::unit::CholesterolUnit;
use super::validation::{BatchValidationError, Field, FieldError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Female, Sex::Male];

    pub fn label(self) -> &'static str {
        match self {
            Sex::Female => "female",
            Sex::Male => "male",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sex {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("female") {
            Ok(Sex::Female)
        } else if s.eq_ignore_ascii_case("male") {
            Ok(Sex::Male)
        } else {
            Err(CoreError::UnknownSex(s.to_string()))
        }
    }
}

/// Current smoking status, encoded 0 (non-smoker) / 1 (smoker) on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Smoking {
    NonSmoker,
    Smoker,
}

impl Smoking {
    pub const ALL: [Smoking; 2] = [Smoking::NonSmoker, Smoking::Smoker];

    pub fn label(self) -> &'static str {
        match self {
            Smoking::NonSmoker => "non_smoker",
            Smoking::Smoker => "smoker",
        }
    }
}

impl fmt::Display for Smoking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<bool> for Smoking {
    fn from(smoker: bool) -> Self {
        if smoker { Smoking::Smoker } else { Smoking::NonSmoker }
    }
}

impl TryFrom<f64> for Smoking {
    type Error = CoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value == 0.0 {
            Ok(Smoking::NonSmoker)
        } else if value == 1.0 {
            Ok(Smoking::Smoker)
        } else {
            Err(CoreError::InvalidSmoker(value))
        }
    }
}

/// The predictor set for one individual.
///
/// Cholesterol values share a unit, given separately at scoring time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Predictors {
    pub sex: Sex,
    /// Years.
    pub age: f64,
    pub total_cholesterol: f64,
    pub hdl_cholesterol: f64,
    /// mmHg.
    pub systolic_bp: f64,
    pub smoking: Smoking,
}

impl Predictors {
    /// Total minus HDL cholesterol, converted to mmol/L.
    pub fn non_hdl_cholesterol(&self, unit: CholesterolUnit) -> f64 {
        unit.to_mmol_per_l(self.total_cholesterol - self.hdl_cholesterol)
    }

    /// Field errors for this record; empty when every numeric field is finite.
    pub fn field_errors(&self, record: usize) -> Vec<FieldError> {
        [
            (Field::Age, self.age),
            (Field::TotalCholesterol, self.total_cholesterol),
            (Field::HdlCholesterol, self.hdl_cholesterol),
            (Field::SystolicBp, self.systolic_bp),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_finite())
        .map(|(field, value)| FieldError::not_finite(record, field, value))
        .collect()
    }
}

/// Raw batched input: one column per predictor, all of equal length.
///
/// Values arrive unvalidated. `sex` holds labels, `smoker` holds 0/1 codes
/// and numeric columns may contain missing entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PredictorColumns {
    pub sex: Vec<String>,
    pub age: Vec<Option<f64>>,
    pub total_cholesterol: Vec<Option<f64>>,
    pub hdl_cholesterol: Vec<Option<f64>>,
    pub systolic_bp: Vec<Option<f64>>,
    pub smoker: Vec<Option<f64>>,
}

impl PredictorColumns {
    pub fn len(&self) -> usize {
        self.sex.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sex.is_empty()
    }

    /// Append an already-typed record.
    pub fn push(&mut self, predictors: &Predictors) {
        self.sex.push(predictors.sex.label().to_string());
        self.age.push(Some(predictors.age));
        self.total_cholesterol.push(Some(predictors.total_cholesterol));
        self.hdl_cholesterol.push(Some(predictors.hdl_cholesterol));
        self.systolic_bp.push(Some(predictors.systolic_bp));
        self.smoker.push(Some(match predictors.smoking {
            Smoking::NonSmoker => 0.0,
            Smoking::Smoker => 1.0,
        }));
    }

    /// Validate the whole batch at once.
    ///
    /// Columns of unequal length fail immediately. Otherwise every invalid
    /// field in every record is collected into a single
    /// [`BatchValidationError`]; no record is returned unless all are valid.
    /// Advisories are not raised here; scoring attaches them per record.
    pub fn validate(&self) -> Result<Vec<Predictors>, CoreError> {
        let expected = self.len();
        let lengths = [
            (Field::Age, self.age.len()),
            (Field::TotalCholesterol, self.total_cholesterol.len()),
            (Field::HdlCholesterol, self.hdl_cholesterol.len()),
            (Field::SystolicBp, self.systolic_bp.len()),
            (Field::Smoker, self.smoker.len()),
        ];
        if let Some((column, found)) = lengths.into_iter().find(|(_, len)| *len != expected) {
            return Err(CoreError::ColumnLengthMismatch {
                column,
                expected,
                found,
            });
        }

        let mut errors = Vec::new();
        let mut records = Vec::with_capacity(expected);
        for record in 0..expected {
            if let Some(predictors) = self.record(record, &mut errors) {
                records.push(predictors);
            }
        }

        if !errors.is_empty() {
            return Err(BatchValidationError { errors }.into());
        }
        Ok(records)
    }

    fn record(&self, record: usize, errors: &mut Vec<FieldError>) -> Option<Predictors> {
        let before = errors.len();

        let sex = match self.sex[record].parse::<Sex>() {
            Ok(sex) => Some(sex),
            Err(_) => {
                errors.push(FieldError::out_of_domain(
                    record,
                    Field::Sex,
                    self.sex[record].as_str(),
                    "must be \"female\" or \"male\"",
                ));
                None
            }
        };

        let mut numeric = |field: Field, value: Option<f64>| match value {
            None => {
                errors.push(FieldError::missing(record, field));
                None
            }
            Some(v) if !v.is_finite() => {
                errors.push(FieldError::not_finite(record, field, v));
                None
            }
            Some(v) => Some(v),
        };
        let age = numeric(Field::Age, self.age[record]);
        let total_cholesterol = numeric(Field::TotalCholesterol, self.total_cholesterol[record]);
        let hdl_cholesterol = numeric(Field::HdlCholesterol, self.hdl_cholesterol[record]);
        let systolic_bp = numeric(Field::SystolicBp, self.systolic_bp[record]);
        let smoker = numeric(Field::Smoker, self.smoker[record]);

        let smoking = smoker.and_then(|code| match Smoking::try_from(code) {
            Ok(smoking) => Some(smoking),
            Err(_) => {
                errors.push(FieldError::out_of_domain(
                    record,
                    Field::Smoker,
                    code.to_string(),
                    "must be 0 or 1",
                ));
                None
            }
        });

        if errors.len() != before {
            return None;
        }
        Some(Predictors {
            sex: sex?,
            age: age?,
            total_cholesterol: total_cholesterol?,
            hdl_cholesterol: hdl_cholesterol?,
            systolic_bp: systolic_bp?,
            smoking: smoking?,
        })
    }
}

impl FromIterator<Predictors> for PredictorColumns {
    fn from_iter<I: IntoIterator<Item = Predictors>>(iter: I) -> Self {
        let mut columns = PredictorColumns::default();
        for predictors in iter {
            columns.push(&predictors);
        }
        columns
    }
}
