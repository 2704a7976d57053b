use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Multiplier taking a cholesterol concentration from mg/dL to mmol/L.
pub const MG_DL_TO_MMOL_L: f64 = 0.0259;

/// Unit the cholesterol inputs are expressed in. Binning always happens in
/// mmol/L.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CholesterolUnit {
    #[default]
    #[serde(rename = "mmol/L")]
    MmolPerL,
    #[serde(rename = "mg/dL")]
    MgPerDl,
}

impl CholesterolUnit {
    pub fn label(self) -> &'static str {
        match self {
            CholesterolUnit::MmolPerL => "mmol/L",
            CholesterolUnit::MgPerDl => "mg/dL",
        }
    }

    pub fn to_mmol_per_l(self, value: f64) -> f64 {
        match self {
            CholesterolUnit::MmolPerL => value,
            CholesterolUnit::MgPerDl => value * MG_DL_TO_MMOL_L,
        }
    }
}

impl fmt::Display for CholesterolUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CholesterolUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("mmol/l") || s.eq_ignore_ascii_case("mmol") {
            Ok(CholesterolUnit::MmolPerL)
        } else if s.eq_ignore_ascii_case("mg/dl") || s.eq_ignore_ascii_case("mg") {
            Ok(CholesterolUnit::MgPerDl)
        } else {
            Err(CoreError::UnknownUnit(s.to_string()))
        }
    }
}
