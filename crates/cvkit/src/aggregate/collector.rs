//! Collecting derived columns from enriched tables.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{debug, info, warn};

use crate::columns::{CURRENT_DENSITY, E_RHE};
use crate::error::{CvkitError, Result};
use crate::input::{ExperimentTable, TableLoader};

/// Columns projected out of every enriched table.
pub const AGGREGATE_COLUMNS: [&str; 2] = [E_RHE, CURRENT_DENSITY];

/// Enriched projections keyed by source file name, in numeric file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateCollection {
    tables: IndexMap<String, ExperimentTable>,
}

impl AggregateCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, table: ExperimentTable) {
        self.tables.insert(name.into(), table);
    }

    pub fn get(&self, name: &str) -> Option<&ExperimentTable> {
        self.tables.get(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// File names in iteration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExperimentTable)> {
        self.tables.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Scans a directory of enriched tables.
#[derive(Debug, Clone)]
pub struct Aggregator {
    loader: TableLoader,
    extension: String,
}

impl Aggregator {
    /// Create an aggregator for `*.csv` tables.
    pub fn new() -> Self {
        Self {
            loader: TableLoader::new(),
            extension: "csv".to_string(),
        }
    }

    /// Match files with a different extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Use a custom table loader.
    pub fn with_loader(mut self, loader: TableLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Build the collection from every table in `directory`.
    ///
    /// Tables that fail to load are reported and skipped; tables without both derived columns
    /// are left out. Fails when a file name carries no usable numeric index.
    pub fn collect(&self, directory: impl AsRef<Path>) -> Result<AggregateCollection> {
        let directory = directory.as_ref();
        let mut collection = AggregateCollection::new();

        for (_, path) in numbered_tables(directory, &self.extension)? {
            let name = file_name(&path);
            let table = match self.loader.load(&path) {
                Ok(table) => table,
                Err(e) => {
                    warn!("{}", e);
                    continue;
                }
            };
            if table.first_missing(&AGGREGATE_COLUMNS).is_some() {
                debug!("{} has no derived columns, leaving it out", name);
                continue;
            }
            collection.insert(name, table.select(&AGGREGATE_COLUMNS)?);
        }

        info!(
            "Collected {} tables from {}",
            collection.len(),
            directory.display()
        );
        Ok(collection)
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// List files in `directory` ending in `.extension`, ordered by the number in their name.
///
/// The sort key is the integer formed by every digit of the file name. A name with no digits,
/// or two names with the same key, is rejected with [`CvkitError::MalformedInput`].
pub fn numbered_tables(directory: &Path, extension: &str) -> Result<Vec<(u64, PathBuf)>> {
    let entries = fs::read_dir(directory).map_err(|e| CvkitError::io(directory, e))?;
    let suffix = format!(".{}", extension);

    let mut tables = Vec::new();
    let mut seen: HashMap<u64, String> = HashMap::new();
    for entry in entries {
        let entry = entry.map_err(|e| CvkitError::io(directory, e))?;
        let path = entry.path();
        let name = file_name(&path);
        if !name.ends_with(&suffix) || !path.is_file() {
            continue;
        }

        let key = sort_key(&name)?;
        if let Some(other) = seen.insert(key, name.clone()) {
            return Err(CvkitError::MalformedInput(format!(
                "'{}' and '{}' share the numeric index {}",
                other, name, key
            )));
        }
        tables.push((key, path));
    }

    tables.sort_by_key(|(key, _)| *key);
    Ok(tables)
}

/// Integer formed by all digits in `name`.
fn sort_key(name: &str) -> Result<u64> {
    let digits: String = name.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(CvkitError::MalformedInput(format!(
            "'{}' has no numeric index in its name",
            name
        )));
    }
    digits.parse::<u64>().map_err(|e| {
        CvkitError::MalformedInput(format!("'{}' has an unusable numeric index: {}", name, e))
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
