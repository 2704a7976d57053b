use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::predictors::Predictors;

/// Youngest age the risk chart was derived for. Younger individuals are
/// still scored, in the bottom age bin, with an advisory attached.
pub const MODEL_MIN_AGE: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AdvisoryKind {
    /// Age is below [`MODEL_MIN_AGE`]; the estimate has reduced accuracy.
    AgeBelowModelRange,
}

/// A non-fatal warning about one record. Scoring proceeds regardless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Advisory {
    pub record: usize,
    pub kind: AdvisoryKind,
    pub message: String,
}

impl Advisory {
    /// Advisory raised for `predictors` at position `record`, if any.
    pub fn check(record: usize, predictors: &Predictors) -> Option<Self> {
        (predictors.age < MODEL_MIN_AGE).then(|| Advisory {
            record,
            kind: AdvisoryKind::AgeBelowModelRange,
            message: format!(
                "record {record}: age {} is below {MODEL_MIN_AGE}; risk estimate has reduced accuracy",
                predictors.age
            ),
        })
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
