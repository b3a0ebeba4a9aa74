//! The four enrichment stages as pure table transformations.

use serde::{Deserialize, Serialize};

use crate::columns::{
    AREA, CONSTANT, CURRENT, CURRENT_DENSITY, E_RHE, FILLED, NHE, PH, POTENTIAL, RESISTANCE,
};
use crate::error::{CvkitError, Result};
use crate::input::{Cell, ExperimentTable};

use super::metadata::ExperimentMetadata;

/// One step of the enrichment pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Prepend the metadata row.
    MetadataMerge,
    /// Propagate metadata values down their columns.
    ForwardFill,
    /// Add `E(RHE)` after `Current`.
    ReferenceCorrection,
    /// Add `Current Density` after `E(RHE)`.
    DensityNormalization,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 4] = [
        Stage::MetadataMerge,
        Stage::ForwardFill,
        Stage::ReferenceCorrection,
        Stage::DensityNormalization,
    ];

    /// Short snake_case name.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::MetadataMerge => "metadata_merge",
            Stage::ForwardFill => "forward_fill",
            Stage::ReferenceCorrection => "reference_correction",
            Stage::DensityNormalization => "density_normalization",
        }
    }

    /// Columns that must be present before the stage runs.
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Stage::MetadataMerge | Stage::ForwardFill => &[],
            Stage::ReferenceCorrection => &[POTENTIAL, NHE, CONSTANT, PH, CURRENT, RESISTANCE],
            Stage::DensityNormalization => &[CURRENT, AREA],
        }
    }

    /// Run the stage on `table`.
    ///
    /// On error the table is left unchanged.
    pub fn apply(&self, table: &mut ExperimentTable, metadata: &ExperimentMetadata) -> Result<()> {
        if let Some(column) = table.first_missing(self.required_columns()) {
            return Err(CvkitError::MissingColumn {
                stage: self.name().to_string(),
                column: column.to_string(),
            });
        }
        match self {
            Stage::MetadataMerge => {
                merge_metadata(table, metadata);
                Ok(())
            }
            Stage::ForwardFill => {
                forward_fill(table, &FILLED);
                Ok(())
            }
            Stage::ReferenceCorrection => add_reference_potential(table),
            Stage::DensityNormalization => add_current_density(table),
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Prepend one row holding the metadata constants.
///
/// Existing columns get a null in the new row; metadata columns the table lacks are appended.
pub fn merge_metadata(table: &mut ExperimentTable, metadata: &ExperimentMetadata) {
    table.prepend_row(metadata.to_row());
}

/// Replace every null in `columns` with the closest non-null value above it.
///
/// Columns that are absent are ignored. Returns the number of cells filled.
pub fn forward_fill(table: &mut ExperimentTable, columns: &[&str]) -> usize {
    let mut filled = 0;
    for name in columns {
        let Some(cells) = table.column_mut(name) else {
            continue;
        };
        let mut last: Option<Cell> = None;
        for cell in cells.iter_mut() {
            if cell.is_null() {
                if let Some(ref value) = last {
                    *cell = value.clone();
                    filled += 1;
                }
            } else {
                last = Some(cell.clone());
            }
        }
    }
    filled
}

/// Compute `E(RHE) = Potential + NHE + Constant*pH - Current*R` and place it after `Current`.
///
/// Rows where any operand is not a number get a null.
pub fn add_reference_potential(table: &mut ExperimentTable) -> Result<()> {
    let values = {
        let stage = Stage::ReferenceCorrection;
        let potential = require(table, POTENTIAL, stage)?;
        let nhe = require(table, NHE, stage)?;
        let constant = require(table, CONSTANT, stage)?;
        let ph = require(table, PH, stage)?;
        let current = require(table, CURRENT, stage)?;
        let r = require(table, RESISTANCE, stage)?;

        let corrected = |row: usize| -> Option<f64> {
            Some(
                potential[row].as_f64()? + nhe[row].as_f64()?
                    + constant[row].as_f64()? * ph[row].as_f64()?
                    - current[row].as_f64()? * r[row].as_f64()?,
            )
        };
        (0..table.row_count())
            .map(|row| Cell::from(corrected(row)))
            .collect::<Vec<_>>()
    };
    table.insert_column_after(CURRENT, E_RHE, values)
}

/// Compute `Current Density = Current / Area (cm^2)` and place it after `E(RHE)`.
pub fn add_current_density(table: &mut ExperimentTable) -> Result<()> {
    if !table.has_column(E_RHE) {
        return Err(CvkitError::MissingColumn {
            stage: Stage::DensityNormalization.name().to_string(),
            column: E_RHE.to_string(),
        });
    }
    let values = {
        let current = require(table, CURRENT, Stage::DensityNormalization)?;
        let area = require(table, AREA, Stage::DensityNormalization)?;
        current
            .iter()
            .zip(area)
            .map(|(i, a)| Cell::from(i.as_f64().zip(a.as_f64()).map(|(i, a)| i / a)))
            .collect::<Vec<_>>()
    };
    table.insert_column_after(E_RHE, CURRENT_DENSITY, values)
}

fn require<'t>(table: &'t ExperimentTable, name: &str, stage: Stage) -> Result<&'t [Cell]> {
    table.column(name).ok_or_else(|| CvkitError::MissingColumn {
        stage: stage.name().to_string(),
        column: name.to_string(),
    })
}
