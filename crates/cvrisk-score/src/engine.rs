//! Table lookup: predictors in, one coefficient per record out.

use std::sync::Arc;

use cvrisk_core::error::CoreError;
use cvrisk_core::models::{
    Advisory, BatchValidationError, CholesterolUnit, PredictorColumns, Predictors, RiskCategory,
    RiskRegion,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::cell::Cell;
use crate::error::{ScoreError, TableError};
use crate::table::{CoefficientTable, Provenance};

/// Per-call settings: which regional sub-table to use and the unit of the
/// cholesterol inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoringOptions {
    pub region: RiskRegion,
    pub cholesterol_unit: CholesterolUnit,
}

/// The score for one individual and the cell it was read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoredRecord {
    /// Estimated ten-year event risk, in percent, exactly as tabulated.
    pub score: u8,
    pub cell: Cell,
    pub category: RiskCategory,
    pub advisory: Option<Advisory>,
}

/// Scores for a batch, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BatchScore {
    pub options: ScoringOptions,
    pub table_version: u32,
    pub table_provenance: Provenance,
    pub records: Vec<ScoredRecord>,
}

impl BatchScore {
    pub fn scores(&self) -> Vec<u8> {
        self.records.iter().map(|r| r.score).collect()
    }

    pub fn advisories(&self) -> impl Iterator<Item = &Advisory> {
        self.records.iter().filter_map(|r| r.advisory.as_ref())
    }
}

/// Stateless scorer over a shared, read-only coefficient table.
#[derive(Debug, Clone)]
pub struct ScoreEngine {
    table: Arc<CoefficientTable>,
}

impl ScoreEngine {
    pub fn new(table: Arc<CoefficientTable>) -> Self {
        Self { table }
    }

    /// Engine over the dataset compiled into this crate.
    pub fn bundled() -> Result<Self, TableError> {
        CoefficientTable::bundled().map(Self::new)
    }

    pub fn table(&self) -> &CoefficientTable {
        &self.table
    }

    pub fn cell(&self, predictors: &Predictors, unit: CholesterolUnit) -> Cell {
        self.table.discretizer().cell(predictors, unit)
    }

    /// Score one individual.
    pub fn score_record(
        &self,
        options: ScoringOptions,
        predictors: &Predictors,
    ) -> Result<ScoredRecord, ScoreError> {
        let errors = predictors.field_errors(0);
        if !errors.is_empty() {
            return Err(CoreError::from(BatchValidationError { errors }).into());
        }
        Ok(self.lookup(options, 0, predictors))
    }

    /// Score a batch of raw columns.
    ///
    /// The whole batch is validated first; any invalid field fails the call
    /// and no scores are produced. Records are then scored independently and
    /// in parallel.
    pub fn score(
        &self,
        options: ScoringOptions,
        columns: &PredictorColumns,
    ) -> Result<BatchScore, ScoreError> {
        let records = columns.validate()?;
        Ok(self.score_valid(options, &records))
    }

    /// Score already-typed records, checking only that numeric fields are finite.
    pub fn score_records(
        &self,
        options: ScoringOptions,
        records: &[Predictors],
    ) -> Result<BatchScore, ScoreError> {
        let errors: Vec<_> = records
            .iter()
            .enumerate()
            .flat_map(|(i, p)| p.field_errors(i))
            .collect();
        if !errors.is_empty() {
            return Err(CoreError::from(BatchValidationError { errors }).into());
        }
        Ok(self.score_valid(options, records))
    }

    fn score_valid(&self, options: ScoringOptions, records: &[Predictors]) -> BatchScore {
        debug!(
            records = records.len(),
            region = %options.region,
            unit = %options.cholesterol_unit,
            "scoring batch"
        );

        let scored: Vec<ScoredRecord> = records
            .par_iter()
            .enumerate()
            .map(|(i, predictors)| self.lookup(options, i, predictors))
            .collect();

        let advised = scored.iter().filter(|r| r.advisory.is_some()).count();
        if advised > 0 {
            warn!(
                count = advised,
                "records below the model's age range were scored with reduced accuracy"
            );
        }

        BatchScore {
            options,
            table_version: self.table.version(),
            table_provenance: self.table.provenance(),
            records: scored,
        }
    }

    fn lookup(&self, options: ScoringOptions, record: usize, predictors: &Predictors) -> ScoredRecord {
        let cell = self.cell(predictors, options.cholesterol_unit);
        let score = self.table.get(options.region, cell);
        ScoredRecord {
            score,
            cell,
            category: RiskCategory::classify(score),
            advisory: Advisory::check(record, predictors),
        }
    }
}
