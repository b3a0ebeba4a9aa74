//! In-memory experiment table with ordered, named columns.

use indexmap::IndexMap;

use super::value::Cell;
use crate::error::{CvkitError, Result};

/// A table of named columns in a fixed order.
///
/// Every column holds exactly [`ExperimentTable::row_count`] cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExperimentTable {
    columns: IndexMap<String, Vec<Cell>>,
    rows: usize,
}

impl ExperimentTable {
    /// Create an empty table with the given headers.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = headers
            .into_iter()
            .map(|h| (h.into(), Vec::new()))
            .collect();
        Self { columns, rows: 0 }
    }

    /// Build a table from row-major data. Short rows are padded with nulls.
    ///
    /// Returns [`CvkitError::MalformedInput`] when a row is longer than the header.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let mut table = Self::new(headers);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() > table.column_count() {
                return Err(CvkitError::MalformedInput(format!(
                    "Expected {} fields in row {}, saw {}",
                    table.column_count(),
                    index + 1,
                    row.len()
                )));
            }
            table.push_row(row);
        }
        Ok(table)
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(|k| k.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Position of a column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&[Cell]> {
        self.columns.get(name).map(|c| c.as_slice())
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Vec<Cell>> {
        self.columns.get_mut(name)
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        self.columns.get(column).and_then(|c| c.get(row))
    }

    /// Return the first of `required` that is not a column of this table.
    pub fn first_missing<'a>(&self, required: &[&'a str]) -> Option<&'a str> {
        required.iter().copied().find(|name| !self.has_column(name))
    }

    /// Append a row. Missing trailing cells are padded with nulls, extra cells dropped.
    pub fn push_row(&mut self, row: Vec<Cell>) {
        let mut cells = row.into_iter();
        for column in self.columns.values_mut() {
            column.push(cells.next().unwrap_or_default());
        }
        self.rows += 1;
    }

    /// Insert a row in front of all existing rows.
    ///
    /// Values are matched by column name. Columns of this table missing from `values` get a
    /// null; names in `values` that are not yet columns are appended as new columns, null in
    /// every existing row.
    pub fn prepend_row(&mut self, mut values: IndexMap<String, Cell>) {
        for name in values.keys() {
            if !self.columns.contains_key(name) {
                self.columns.insert(name.clone(), vec![Cell::Null; self.rows]);
            }
        }
        for (name, column) in self.columns.iter_mut() {
            column.insert(0, values.shift_remove(name).unwrap_or_default());
        }
        self.rows += 1;
    }

    /// Append a column at the end, or replace it in place if it already exists.
    pub fn set_column(&mut self, name: impl Into<String>, cells: Vec<Cell>) -> Result<()> {
        let name = name.into();
        self.check_length(&name, cells.len())?;
        if self.columns.is_empty() {
            self.rows = cells.len();
        }
        self.columns.insert(name, cells);
        Ok(())
    }

    /// Place a column directly after `anchor`.
    ///
    /// An existing column with the same name is removed first, so the result always has the
    /// new column at `index_of(anchor) + 1`.
    pub fn insert_column_after(
        &mut self,
        anchor: &str,
        name: impl Into<String>,
        cells: Vec<Cell>,
    ) -> Result<()> {
        let name = name.into();
        self.check_length(&name, cells.len())?;
        if name == anchor || !self.has_column(anchor) {
            return Err(CvkitError::MissingColumn {
                stage: format!("insert '{}'", name),
                column: anchor.to_string(),
            });
        }
        self.columns.shift_remove(&name);
        let position = self.column_index(anchor).unwrap_or(self.columns.len() - 1);
        self.columns.shift_insert(position + 1, name, cells);
        Ok(())
    }

    /// Remove a column, returning its cells.
    pub fn remove_column(&mut self, name: &str) -> Option<Vec<Cell>> {
        self.columns.shift_remove(name)
    }

    /// Keep only the named columns, in the given order.
    pub fn select(&self, names: &[&str]) -> Result<Self> {
        let mut columns = IndexMap::with_capacity(names.len());
        for &name in names {
            let cells = self.columns.get(name).ok_or_else(|| CvkitError::MissingColumn {
                stage: "select".to_string(),
                column: name.to_string(),
            })?;
            columns.insert(name.to_string(), cells.clone());
        }
        Ok(Self {
            columns,
            rows: self.rows,
        })
    }

    /// Iterate rows as slices of cell references, in column order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Cell>> + '_ {
        (0..self.rows).map(move |row| self.columns.values().map(|c| &c[row]).collect())
    }

    /// Render the header and the first `n` rows as aligned text.
    pub fn preview(&self, n: usize) -> String {
        let headers: Vec<&str> = self.column_names().collect();
        let body: Vec<Vec<String>> = self
            .rows()
            .take(n)
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();

        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                body.iter()
                    .map(|r| r[i].len())
                    .chain(std::iter::once(h.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let index_width = n.min(self.rows).saturating_sub(1).to_string().len();
        let mut out = String::new();
        out.push_str(&" ".repeat(index_width));
        for (h, w) in headers.iter().zip(&widths) {
            out.push_str(&format!("  {:>w$}", h, w = *w));
        }
        for (i, row) in body.iter().enumerate() {
            out.push('\n');
            out.push_str(&format!("{:<w$}", i, w = index_width));
            for (value, w) in row.iter().zip(&widths) {
                out.push_str(&format!("  {:>w$}", value, w = *w));
            }
        }
        out
    }

    fn check_length(&self, name: &str, len: usize) -> Result<()> {
        if self.columns.is_empty() || len == self.rows {
            Ok(())
        } else {
            Err(CvkitError::MalformedInput(format!(
                "Column '{}' has {} values but the table has {} rows",
                name, len, self.rows
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ExperimentTable {
        ExperimentTable::from_rows(
            vec!["Potential".into(), "Current".into()],
            vec![
                vec![Cell::Float(0.1), Cell::Float(0.002)],
                vec![Cell::Float(0.2), Cell::Float(0.004)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_rows_pads_short_rows() {
        let table = ExperimentTable::from_rows(
            vec!["a".into(), "b".into()],
            vec![vec![Cell::Int(1)]],
        )
        .unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.get(0, "b"), Some(&Cell::Null));
    }

    #[test]
    fn test_from_rows_rejects_long_rows() {
        let err = ExperimentTable::from_rows(
            vec!["a".into()],
            vec![vec![Cell::Int(1), Cell::Int(2)]],
        )
        .unwrap_err();
        assert!(matches!(err, CvkitError::MalformedInput(_)));
    }

    #[test]
    fn test_insert_column_after() {
        let mut table = sample();
        table.set_column("R", vec![Cell::Float(8.2); 2]).unwrap();
        table
            .insert_column_after("Current", "E(RHE)", vec![Cell::Null; 2])
            .unwrap();

        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, vec!["Potential", "Current", "E(RHE)", "R"]);
    }

    #[test]
    fn test_insert_column_after_moves_existing() {
        let mut table = sample();
        table.set_column("X", vec![Cell::Null; 2]).unwrap();
        table.insert_column_after("Potential", "X", vec![Cell::Int(1); 2]).unwrap();

        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, vec!["Potential", "X", "Current"]);
        assert_eq!(table.get(1, "X"), Some(&Cell::Int(1)));
    }

    #[test]
    fn test_insert_column_after_missing_anchor() {
        let mut table = sample();
        let err = table
            .insert_column_after("E(RHE)", "Current Density", vec![Cell::Null; 2])
            .unwrap_err();
        assert!(matches!(err, CvkitError::MissingColumn { ref column, .. } if column == "E(RHE)"));
        assert!(!table.has_column("Current Density"));
    }

    #[test]
    fn test_set_column_length_mismatch() {
        let mut table = sample();
        assert!(table.set_column("bad", vec![Cell::Null]).is_err());
    }

    #[test]
    fn test_prepend_row() {
        let mut table = sample();
        let mut values = IndexMap::new();
        values.insert("NHE".to_string(), Cell::Float(0.0385));
        table.prepend_row(values);

        assert_eq!(table.row_count(), 3);
        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, vec!["Potential", "Current", "NHE"]);
        assert_eq!(table.get(0, "Potential"), Some(&Cell::Null));
        assert_eq!(table.get(0, "NHE"), Some(&Cell::Float(0.0385)));
        assert_eq!(table.get(1, "NHE"), Some(&Cell::Null));
        assert_eq!(table.get(1, "Potential"), Some(&Cell::Float(0.1)));
    }

    #[test]
    fn test_select_keeps_requested_order() {
        let table = sample();
        let projected = table.select(&["Current", "Potential"]).unwrap();
        let names: Vec<&str> = projected.column_names().collect();
        assert_eq!(names, vec!["Current", "Potential"]);
        assert_eq!(projected.row_count(), 2);
        assert!(table.select(&["E(RHE)"]).is_err());
    }

    #[test]
    fn test_preview() {
        let preview = sample().preview(1);
        assert!(preview.contains("Potential"));
        assert!(preview.contains("0.1"));
        assert!(!preview.contains("0.2"));
    }

    #[test]
    fn test_first_missing() {
        let table = sample();
        assert_eq!(table.first_missing(&["Potential", "R", "pH"]), Some("R"));
        assert_eq!(table.first_missing(&["Current"]), None);
    }
}
