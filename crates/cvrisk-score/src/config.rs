use std::path::{Path, PathBuf};
use std::sync::Arc;

use cvrisk_core::models::{CholesterolUnit, RiskRegion};
use serde::{Deserialize, Serialize};

use crate::engine::{ScoreEngine, ScoringOptions};
use crate::error::{ConfigError, TableError};
use crate::table::CoefficientTable;

/// Current config version. Bump this when changing the shape of
/// [`ScoringConfig`].
pub const CURRENT_VERSION: u32 = 1;

pub const ENV_REGION: &str = "CVRISK_REGION";
pub const ENV_CHOLESTEROL_UNIT: &str = "CVRISK_CHOLESTEROL_UNIT";
pub const ENV_COEFFICIENTS: &str = "CVRISK_COEFFICIENTS";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Schema version. Missing or 0 is read as the current version.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default)]
    pub region: RiskRegion,
    #[serde(default)]
    pub cholesterol_unit: CholesterolUnit,
    /// Replacement coefficient dataset; the bundled one is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coefficients_path: Option<PathBuf>,
}

impl ScoringConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_json(&contents)?;
        tracing::info!(path = %path.display(), region = %config.region, "scoring config loaded");
        Ok(config)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        // Parse as raw JSON first so the version gate runs before field parsing.
        let json: serde_json::Value =
            serde_json::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let on_disk_version = json
            .get("config_version")
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        if on_disk_version > u64::from(CURRENT_VERSION) {
            return Err(ConfigError::UnsupportedVersion {
                found: u32::try_from(on_disk_version).unwrap_or(u32::MAX),
                supported: CURRENT_VERSION,
            });
        }

        let mut config: ScoringConfig =
            serde_json::from_value(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.config_version = CURRENT_VERSION;
        Ok(config)
    }

    /// Read `CVRISK_REGION`, `CVRISK_CHOLESTEROL_UNIT` and
    /// `CVRISK_COEFFICIENTS`, defaulting each one that is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let region = match var(ENV_REGION) {
            Some(label) => {
                label
                    .parse::<RiskRegion>()
                    .map_err(|source| ConfigError::InvalidValue {
                        key: ENV_REGION,
                        source,
                    })?
            }
            None => RiskRegion::default(),
        };
        let cholesterol_unit = match var(ENV_CHOLESTEROL_UNIT) {
            Some(label) => label
                .parse::<CholesterolUnit>()
                .map_err(|source| ConfigError::InvalidValue {
                    key: ENV_CHOLESTEROL_UNIT,
                    source,
                })?,
            None => CholesterolUnit::default(),
        };
        Ok(Self {
            config_version: CURRENT_VERSION,
            region,
            cholesterol_unit,
            coefficients_path: var(ENV_COEFFICIENTS)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn options(&self) -> ScoringOptions {
        ScoringOptions {
            region: self.region,
            cholesterol_unit: self.cholesterol_unit,
        }
    }

    /// Build an engine over the configured dataset.
    pub fn engine(&self) -> Result<ScoreEngine, TableError> {
        match &self.coefficients_path {
            Some(path) => CoefficientTable::load(path).map(|t| ScoreEngine::new(Arc::new(t))),
            None => ScoreEngine::bundled(),
        }
    }
}
