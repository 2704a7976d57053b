use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Calibration group selecting which coefficient sub-table applies.
///
/// Labels are `low`, `moderate`, `high` and `very high` (with a space).
/// The underscore spelling `very_high` is rejected with
/// [`CoreError::RegionLabelMismatch`] rather than mapped, so a caller using
/// the wrong label finds out instead of silently scoring another region.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, TS,
)]
#[ts(export)]
pub enum RiskRegion {
    #[default]
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "very high")]
    VeryHigh,
}

impl RiskRegion {
    pub const COUNT: usize = 4;

    pub const ALL: [RiskRegion; Self::COUNT] = [
        RiskRegion::Low,
        RiskRegion::Moderate,
        RiskRegion::High,
        RiskRegion::VeryHigh,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RiskRegion::Low => "low",
            RiskRegion::Moderate => "moderate",
            RiskRegion::High => "high",
            RiskRegion::VeryHigh => "very high",
        }
    }

    /// Position of this region's sub-table in the coefficient table.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for RiskRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RiskRegion {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(RiskRegion::Low),
            "moderate" => Ok(RiskRegion::Moderate),
            "high" => Ok(RiskRegion::High),
            "very high" => Ok(RiskRegion::VeryHigh),
            "very_high" => {
                tracing::warn!(
                    label = s,
                    expected = RiskRegion::VeryHigh.label(),
                    "rejecting underscore region label"
                );
                Err(CoreError::RegionLabelMismatch {
                    found: s.to_string(),
                    expected: RiskRegion::VeryHigh.label(),
                })
            }
            other => Err(CoreError::UnknownRegion(other.to_string())),
        }
    }
}

impl TryFrom<String> for RiskRegion {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl<'de> Deserialize<'de> for RiskRegion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}
