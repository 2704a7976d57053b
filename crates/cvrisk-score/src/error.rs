use cvrisk_core::error::CoreError;
use cvrisk_core::models::RiskRegion;
use thiserror::Error;

use crate::cell::Cell;

/// A defect in the coefficient dataset. Always fatal at load time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("failed to read coefficient dataset {path}: {message}")]
    Read { path: String, message: String },

    #[error("coefficient dataset is not valid JSON: {0}")]
    Parse(String),

    #[error("unsupported dataset format_version {found} (this build reads {supported})")]
    UnsupportedFormat { found: u32, supported: u32 },

    #[error("invalid {axis} cut points {bounds:?}: {reason}")]
    InvalidCutpoints {
        axis: &'static str,
        bounds: Vec<f64>,
        reason: &'static str,
    },

    #[error("row {row}: {axis} bin {value} is outside 1..=4")]
    BinOutOfRange {
        row: usize,
        axis: &'static str,
        value: u8,
    },

    #[error("row {row}: coefficient {value} is not a percentage")]
    CoefficientOutOfRange { row: usize, value: u8 },

    #[error("row {row}: duplicate entry for region {region}, cell {cell}")]
    DuplicateCell {
        row: usize,
        region: RiskRegion,
        cell: Cell,
    },

    #[error("no coefficient for region {region}, cell {cell}")]
    MissingCell { region: RiskRegion, cell: Cell },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {message}")]
    Read { path: String, message: String },

    #[error("config is not valid: {0}")]
    Parse(String),

    #[error("config_version {found} is newer than this build supports ({supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("invalid value for {key}: {source}")]
    InvalidValue {
        key: &'static str,
        #[source]
        source: CoreError,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error(transparent)]
    Validation(#[from] CoreError),

    #[error("coefficient table error: {0}")]
    Table(#[from] TableError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
