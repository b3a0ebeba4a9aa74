//! cvkit CLI - cyclic voltammetry export processor.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::Split {
            input,
            directory,
            portion_size,
        } => commands::split::run(input, directory, portion_size, cli.verbose),

        Commands::Enrich {
            directory,
            metadata,
        } => commands::enrich::run(directory, metadata, cli.verbose),

        Commands::Aggregate { directory, output } => {
            commands::aggregate::run(directory, output, cli.verbose)
        }

        Commands::Run {
            input,
            directory,
            output,
            portion_size,
            metadata,
            json,
        } => commands::run::run(input, directory, output, portion_size, metadata, json),

        Commands::Inspect { file, rows } => commands::inspect::run(file, rows),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
