//! Writing an aggregate collection to a multi-sheet workbook.

use std::path::Path;

use log::info;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::error::{CvkitError, Result};
use crate::input::{Cell, ExperimentTable};

use super::collector::AggregateCollection;

/// Writes one sheet per collection entry, named after the source file.
///
/// Each sheet starts with a bold header row; there is no index column.
#[derive(Debug, Clone, Default)]
pub struct SpreadsheetExporter;

impl SpreadsheetExporter {
    pub fn new() -> Self {
        Self
    }

    /// Write `collection` to `path`, replacing any existing file.
    ///
    /// Errors from the storage layer are returned as is; there is no partial output to keep.
    pub fn export(&self, collection: &AggregateCollection, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if collection.is_empty() {
            return Err(CvkitError::EmptyInput(
                "No enriched tables to export".to_string(),
            ));
        }

        let mut workbook = Workbook::new();
        for (name, table) in collection.iter() {
            let sheet = workbook.add_worksheet();
            sheet.set_name(name)?;
            self.write_sheet(sheet, table)?;
        }
        workbook.save(path)?;

        info!(
            "Data successfully saved to {} ({} sheets)",
            path.display(),
            collection.len()
        );
        Ok(())
    }

    fn write_sheet(&self, sheet: &mut Worksheet, table: &ExperimentTable) -> Result<()> {
        let header_format = Format::new().set_bold();
        for (col, name) in table.column_names().enumerate() {
            sheet.write_string_with_format(0, col as u16, name, &header_format)?;
        }

        for (row, cells) in table.rows().enumerate() {
            let row = row as u32 + 1;
            for (col, cell) in cells.into_iter().enumerate() {
                let col = col as u16;
                match cell {
                    Cell::Null => {}
                    Cell::Int(i) => {
                        sheet.write_number(row, col, *i as f64)?;
                    }
                    Cell::Float(f) if f.is_finite() => {
                        sheet.write_number(row, col, *f)?;
                    }
                    Cell::Float(_) => {
                        sheet.write_string(row, col, cell.to_field())?;
                    }
                    Cell::Text(s) => {
                        sheet.write_string(row, col, s)?;
                    }
                }
            }
        }
        Ok(())
    }
}
