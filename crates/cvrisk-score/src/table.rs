//! The coefficient table: one integer risk percentage per (region, cell).
//!
//! The table is built from a versioned JSON dataset holding the bin
//! boundaries and one row per `(region, sex, smoking, age bin, sbp bin,
//! cholesterol bin)`. Loading checks that all 1024 entries are present
//! exactly once; a table that fails those checks is never constructed.
//!
//! Each dataset declares its [`Provenance`]. A `placeholder` dataset loads,
//! but with a warning: its rows are not the published chart values.

use std::path::Path;
use std::sync::{Arc, LazyLock};

use cvrisk_core::models::{RiskRegion, Sex, Smoking};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use ts_rs::TS;

use crate::axis::{Bin, Cutpoints, Discretizer};
use crate::cell::{CELL_COUNT, Cell};
use crate::error::TableError;

/// Dataset layout this build understands.
pub const FORMAT_VERSION: u32 = 1;

/// Total number of coefficients across all regions.
pub const ENTRY_COUNT: usize = CELL_COUNT * RiskRegion::COUNT;

const BUNDLED_DATASET: &str = include_str!("../data/coefficients.json");

static BUNDLED: LazyLock<Result<Arc<CoefficientTable>, TableError>> =
    LazyLock::new(|| CoefficientTable::from_json(BUNDLED_DATASET).map(Arc::new));

/// Where a dataset's coefficients come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Provenance {
    /// Transcribed from the published risk chart.
    Published,
    /// Stand-in values with the right shape and ordering; not for clinical use.
    Placeholder,
}

#[derive(Debug, Deserialize)]
struct Dataset {
    format_version: u32,
    version: u32,
    provenance: Provenance,
    #[serde(default)]
    description: String,
    cutpoints: DatasetCutpoints,
    rows: Vec<DatasetRow>,
}

#[derive(Debug, Deserialize)]
struct DatasetCutpoints {
    age: Vec<f64>,
    systolic_bp: Vec<f64>,
    non_hdl_cholesterol: Vec<f64>,
}

/// `[region, sex, smoking, age_bin, sbp_bin, chol_bin, coefficient]`
#[derive(Debug, Deserialize)]
struct DatasetRow(RiskRegion, Sex, Smoking, u8, u8, u8, u8);

#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientTable {
    version: u32,
    provenance: Provenance,
    description: String,
    discretizer: Discretizer,
    coefficients: [[u8; CELL_COUNT]; RiskRegion::COUNT],
}

impl CoefficientTable {
    /// The dataset compiled into this crate, parsed once per process.
    pub fn bundled() -> Result<Arc<CoefficientTable>, TableError> {
        BUNDLED.as_ref().map(Arc::clone).map_err(Clone::clone)
    }

    pub fn load(path: &Path) -> Result<Self, TableError> {
        let json = std::fs::read_to_string(path).map_err(|e| TableError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let dataset: Dataset =
            serde_json::from_str(json).map_err(|e| TableError::Parse(e.to_string()))?;
        Self::from_dataset(dataset)
    }

    fn from_dataset(dataset: Dataset) -> Result<Self, TableError> {
        if dataset.format_version != FORMAT_VERSION {
            return Err(TableError::UnsupportedFormat {
                found: dataset.format_version,
                supported: FORMAT_VERSION,
            });
        }

        let discretizer = Discretizer::new(
            Cutpoints::new("age", &dataset.cutpoints.age)?,
            Cutpoints::new("systolic_bp", &dataset.cutpoints.systolic_bp)?,
            Cutpoints::new("non_hdl_cholesterol", &dataset.cutpoints.non_hdl_cholesterol)?,
        );

        let mut slots = [[None::<u8>; CELL_COUNT]; RiskRegion::COUNT];
        for (row, DatasetRow(region, sex, smoking, age, sbp, chol, value)) in
            dataset.rows.into_iter().enumerate()
        {
            let bin = |axis, number| {
                Bin::from_number(number).ok_or(TableError::BinOutOfRange {
                    row,
                    axis,
                    value: number,
                })
            };
            let cell = Cell {
                sex,
                smoking,
                age: bin("age", age)?,
                systolic_bp: bin("systolic_bp", sbp)?,
                non_hdl_cholesterol: bin("non_hdl_cholesterol", chol)?,
            };
            if value > 100 {
                return Err(TableError::CoefficientOutOfRange { row, value });
            }

            let slot = &mut slots[region.index()][cell.index()];
            if slot.is_some() {
                return Err(TableError::DuplicateCell { row, region, cell });
            }
            *slot = Some(value);
        }

        let mut coefficients = [[0u8; CELL_COUNT]; RiskRegion::COUNT];
        for region in RiskRegion::ALL {
            for cell in Cell::all() {
                coefficients[region.index()][cell.index()] = slots[region.index()][cell.index()]
                    .ok_or(TableError::MissingCell { region, cell })?;
            }
        }

        info!(
            version = dataset.version,
            entries = ENTRY_COUNT,
            "coefficient table loaded"
        );
        if dataset.provenance == Provenance::Placeholder {
            warn!(
                version = dataset.version,
                "coefficient table holds placeholder values, not the published chart"
            );
        }
        Ok(Self {
            version: dataset.version,
            provenance: dataset.provenance,
            description: dataset.description,
            discretizer,
            coefficients,
        })
    }

    /// Revision number of the dataset the table was built from.
    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn discretizer(&self) -> &Discretizer {
        &self.discretizer
    }

    pub fn get(&self, region: RiskRegion, cell: Cell) -> u8 {
        self.coefficients[region.index()][cell.index()]
    }

    /// All coefficients for one region, in [`Cell::index`] order.
    pub fn region(&self, region: RiskRegion) -> &[u8; CELL_COUNT] {
        &self.coefficients[region.index()]
    }

    /// Every `(region, cell, coefficient)` entry, region-major.
    pub fn iter(&self) -> impl Iterator<Item = (RiskRegion, Cell, u8)> + '_ {
        RiskRegion::ALL
            .into_iter()
            .flat_map(move |region| {
                Cell::all().map(move |cell| (region, cell, self.get(region, cell)))
            })
    }
}
