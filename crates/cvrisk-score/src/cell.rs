use std::fmt;

use cvrisk_core::models::{Sex, Smoking};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::axis::Bin;

/// Number of cells per risk region: 2 sexes x 2 smoking states x 4 x 4 x 4.
pub const CELL_COUNT: usize = 2 * 2 * Bin::COUNT * Bin::COUNT * Bin::COUNT;

/// One combination of bins across all five axes.
///
/// Exactly one cell is selected for any valid predictor set; the cell's
/// [`index`](Cell::index) addresses its coefficient within a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cell {
    pub sex: Sex,
    pub smoking: Smoking,
    pub age: Bin,
    pub systolic_bp: Bin,
    pub non_hdl_cholesterol: Bin,
}

impl Cell {
    /// Dense position in `0..CELL_COUNT`, cholesterol varying fastest.
    pub fn index(&self) -> usize {
        let sex = self.sex as usize;
        let smoking = self.smoking as usize;
        (((sex * 2 + smoking) * Bin::COUNT + self.age.index()) * Bin::COUNT
            + self.systolic_bp.index())
            * Bin::COUNT
            + self.non_hdl_cholesterol.index()
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index >= CELL_COUNT {
            return None;
        }
        let n = Bin::COUNT;
        Some(Cell {
            sex: Sex::ALL[index / (2 * n * n * n)],
            smoking: Smoking::ALL[(index / (n * n * n)) % 2],
            age: Bin::ALL[(index / (n * n)) % n],
            systolic_bp: Bin::ALL[(index / n) % n],
            non_hdl_cholesterol: Bin::ALL[index % n],
        })
    }

    /// All cells in index order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..CELL_COUNT).filter_map(Cell::from_index)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, age {}, sbp {}, chol {})",
            self.sex, self.smoking, self.age, self.systolic_bp, self.non_hdl_cholesterol
        )
    }
}
