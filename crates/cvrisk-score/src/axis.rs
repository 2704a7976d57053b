//! Discretization of continuous predictors into ordered, disjoint bins.
//!
//! Every numeric axis is cut by three strictly increasing boundaries into
//! four half-open intervals: `(-inf, c1)`, `[c1, c2)`, `[c2, c3)` and
//! `[c3, +inf)`. A value sitting exactly on a boundary belongs to the higher
//! bin. The boundaries come from the coefficient dataset, not from code.

use std::fmt;

use cvrisk_core::models::{CholesterolUnit, Predictors};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::cell::Cell;
use crate::error::TableError;

/// Index of a bin on a four-bin numeric axis.
///
/// Stored zero-based; serialized and displayed one-based (`1..=4`), which is
/// how the dataset numbers bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, TS)]
#[ts(export)]
pub struct Bin(u8);

impl Bin {
    pub const COUNT: usize = 4;

    pub const ALL: [Bin; Self::COUNT] = [Bin(0), Bin(1), Bin(2), Bin(3)];

    /// Bin from its one-based number.
    pub fn from_number(number: u8) -> Option<Self> {
        (1..=Self::COUNT as u8).contains(&number).then(|| Bin(number - 1))
    }

    pub fn number(self) -> u8 {
        self.0 + 1
    }

    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// One-hot indicator vector for this bin.
    pub fn indicators(self) -> [u8; Self::COUNT] {
        let mut indicators = [0; Self::COUNT];
        indicators[self.index()] = 1;
        indicators
    }
}

impl fmt::Display for Bin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl From<Bin> for u8 {
    fn from(bin: Bin) -> Self {
        bin.number()
    }
}

impl TryFrom<u8> for Bin {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Bin::from_number(number).ok_or_else(|| format!("bin {number} is outside 1..=4"))
    }
}

impl Serialize for Bin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

impl<'de> Deserialize<'de> for Bin {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let number = u8::deserialize(deserializer)?;
        Bin::try_from(number).map_err(serde::de::Error::custom)
    }
}

/// The three boundaries splitting a numeric axis into four bins.
///
/// Only constructible through [`Cutpoints::new`], which deserialization also
/// goes through, so the bins are always disjoint and exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct Cutpoints([f64; 3]);

impl<'de> Deserialize<'de> for Cutpoints {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bounds = Vec::<f64>::deserialize(deserializer)?;
        Cutpoints::new("axis", &bounds).map_err(serde::de::Error::custom)
    }
}

impl Cutpoints {
    pub fn new(axis: &'static str, bounds: &[f64]) -> Result<Self, TableError> {
        let invalid = |reason| TableError::InvalidCutpoints {
            axis,
            bounds: bounds.to_vec(),
            reason,
        };
        let bounds: [f64; 3] = bounds
            .try_into()
            .map_err(|_| invalid("expected exactly three boundaries"))?;
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(invalid("boundaries must be finite"));
        }
        if bounds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(invalid("boundaries must be strictly increasing"));
        }
        Ok(Self(bounds))
    }

    pub fn bounds(&self) -> [f64; 3] {
        self.0
    }

    /// The bin holding `value`: the number of boundaries at or below it.
    pub fn bin(&self, value: f64) -> Bin {
        let above = self.0.iter().filter(|&&bound| value >= bound).count();
        Bin(above as u8)
    }

    /// Inclusive lower and exclusive upper bound of `bin`; `None` is unbounded.
    pub fn interval(&self, bin: Bin) -> (Option<f64>, Option<f64>) {
        let i = bin.index();
        let lower = i.checked_sub(1).map(|j| self.0[j]);
        let upper = self.0.get(i).copied();
        (lower, upper)
    }

    pub fn label(&self, bin: Bin) -> String {
        match self.interval(bin) {
            (None, Some(upper)) => format!("<{upper}"),
            (Some(lower), Some(upper)) => format!("[{lower}, {upper})"),
            (Some(lower), None) => format!(">={lower}"),
            (None, None) => "any".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AxisId {
    Sex,
    Smoking,
    Age,
    SystolicBp,
    NonHdlCholesterol,
}

/// Display metadata for one discretization axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Axis {
    pub id: AxisId,
    pub name: String,
    pub unit: Option<String>,
    pub bins: Vec<String>,
}

/// Maps a predictor set onto its unique cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discretizer {
    age: Cutpoints,
    systolic_bp: Cutpoints,
    non_hdl_cholesterol: Cutpoints,
}

impl Discretizer {
    pub fn new(age: Cutpoints, systolic_bp: Cutpoints, non_hdl_cholesterol: Cutpoints) -> Self {
        Self {
            age,
            systolic_bp,
            non_hdl_cholesterol,
        }
    }

    pub fn age(&self) -> &Cutpoints {
        &self.age
    }

    pub fn systolic_bp(&self) -> &Cutpoints {
        &self.systolic_bp
    }

    /// Non-HDL cholesterol boundaries, in mmol/L.
    pub fn non_hdl_cholesterol(&self) -> &Cutpoints {
        &self.non_hdl_cholesterol
    }

    /// Non-HDL cholesterol is converted to mmol/L before binning.
    pub fn cell(&self, predictors: &Predictors, unit: CholesterolUnit) -> Cell {
        Cell {
            sex: predictors.sex,
            smoking: predictors.smoking,
            age: self.age.bin(predictors.age),
            systolic_bp: self.systolic_bp.bin(predictors.systolic_bp),
            non_hdl_cholesterol: self
                .non_hdl_cholesterol
                .bin(predictors.non_hdl_cholesterol(unit)),
        }
    }

    pub fn axes(&self) -> Vec<Axis> {
        let numeric = |id, name: &str, unit: &str, cutpoints: &Cutpoints| Axis {
            id,
            name: name.to_string(),
            unit: Some(unit.to_string()),
            bins: Bin::ALL.iter().map(|&bin| cutpoints.label(bin)).collect(),
        };
        vec![
            Axis {
                id: AxisId::Sex,
                name: "Sex".to_string(),
                unit: None,
                bins: vec!["female".to_string(), "male".to_string()],
            },
            Axis {
                id: AxisId::Smoking,
                name: "Smoking".to_string(),
                unit: None,
                bins: vec!["non-smoker".to_string(), "smoker".to_string()],
            },
            numeric(AxisId::Age, "Age", "years", &self.age),
            numeric(AxisId::SystolicBp, "Systolic blood pressure", "mmHg", &self.systolic_bp),
            numeric(
                AxisId::NonHdlCholesterol,
                "Non-HDL cholesterol",
                "mmol/L",
                &self.non_hdl_cholesterol,
            ),
        ]
    }
}
