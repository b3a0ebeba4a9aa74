//! Inspect command - list the columns of a table and preview its rows.

use std::path::PathBuf;

use colored::Colorize;
use cvkit::TableLoader;

pub fn run(file: PathBuf, rows: usize) -> Result<(), Box<dyn std::error::Error>> {
    let table = TableLoader::new().load(&file)?;

    println!(
        "{} {} ({} rows)",
        "Columns in".cyan().bold(),
        file.display().to_string().white(),
        table.row_count()
    );
    for (i, name) in table.column_names().enumerate() {
        println!("  {:>3}  {}", i, name);
    }

    if rows > 0 {
        println!();
        println!("{}", table.preview(rows));
    }
    Ok(())
}
