//! Cell values, experiment tables, and delimited-file storage.

mod loader;
mod table;
mod value;

pub use loader::{LoaderConfig, TableLoader};
pub use table::ExperimentTable;
pub use value::Cell;
