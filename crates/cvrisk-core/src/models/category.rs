use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Treatment-oriented risk categories for people aged 70 and over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskCategory {
    /// Score below 7.5%.
    LowToModerate,
    /// Score from 7.5% up to (not including) 15%.
    High,
    /// Score of 15% or more.
    VeryHigh,
}

impl RiskCategory {
    pub const HIGH_THRESHOLD: f64 = 7.5;
    pub const VERY_HIGH_THRESHOLD: f64 = 15.0;

    pub fn classify(score: u8) -> Self {
        let score = f64::from(score);
        if score >= Self::VERY_HIGH_THRESHOLD {
            RiskCategory::VeryHigh
        } else if score >= Self::HIGH_THRESHOLD {
            RiskCategory::High
        } else {
            RiskCategory::LowToModerate
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskCategory::LowToModerate => "low-to-moderate",
            RiskCategory::High => "high",
            RiskCategory::VeryHigh => "very high",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
