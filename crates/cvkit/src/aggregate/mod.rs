//! Consolidating enriched tables into one workbook.

mod collector;
mod export;

pub use collector::{AGGREGATE_COLUMNS, AggregateCollection, Aggregator, numbered_tables};
pub use export::SpreadsheetExporter;
