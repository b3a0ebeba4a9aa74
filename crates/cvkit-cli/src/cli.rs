//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use cvkit::{DEFAULT_PORTION_SIZE, ExperimentMetadata};

/// cvkit: split, enrich and aggregate cyclic voltammetry exports
#[derive(Parser)]
#[command(name = "cvkit")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a raw capture into numbered Potential/Current tables
    Split {
        /// Path to the raw capture file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Directory for the segment tables
        #[arg(short, long, default_value = "parts")]
        directory: PathBuf,

        /// Raw lines per experiment
        #[arg(short, long, default_value_t = default_portion_size())]
        portion_size: NonZeroUsize,
    },

    /// Add metadata, E(RHE) and Current Density to every table in a directory
    Enrich {
        /// Directory holding the segment tables
        #[arg(value_name = "DIR")]
        directory: PathBuf,

        #[command(flatten)]
        metadata: MetadataArgs,
    },

    /// Collect E(RHE) and Current Density from every table into one workbook
    Aggregate {
        /// Directory holding the enriched tables
        #[arg(value_name = "DIR")]
        directory: PathBuf,

        /// Output workbook
        #[arg(short, long, default_value = "combined_data.xlsx")]
        output: PathBuf,
    },

    /// Split, enrich and aggregate in one pass
    Run {
        /// Path to the raw capture file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Directory for the segment tables
        #[arg(short, long, default_value = "parts")]
        directory: PathBuf,

        /// Output workbook
        #[arg(short, long, default_value = "combined_data.xlsx")]
        output: PathBuf,

        /// Raw lines per experiment
        #[arg(short, long, default_value_t = default_portion_size())]
        portion_size: NonZeroUsize,

        #[command(flatten)]
        metadata: MetadataArgs,

        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the columns and first rows of a table
    Inspect {
        /// Path to a table
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Number of rows to preview
        #[arg(short = 'n', long, default_value = "5")]
        rows: usize,
    },
}

/// Experiment constants. Flags override values read from `--metadata`.
#[derive(Args, Clone, Debug, Default)]
pub struct MetadataArgs {
    /// JSON file with NHE, pH, Constant, Area (cm^2) and R
    #[arg(long, value_name = "JSON")]
    pub metadata: Option<PathBuf>,

    /// Reference electrode potential vs NHE (V)
    #[arg(long)]
    pub nhe: Option<f64>,

    /// Electrolyte pH
    #[arg(long)]
    pub ph: Option<f64>,

    /// Nernstian slope (V per pH unit)
    #[arg(long)]
    pub constant: Option<f64>,

    /// Electrode area (cm^2)
    #[arg(long)]
    pub area: Option<f64>,

    /// Uncompensated resistance (ohm)
    #[arg(long)]
    pub resistance: Option<f64>,
}

impl MetadataArgs {
    /// Resolve the constants: defaults, then the JSON file, then individual flags.
    pub fn resolve(&self) -> cvkit::Result<ExperimentMetadata> {
        let mut metadata = match self.metadata {
            Some(ref path) => ExperimentMetadata::load(path)?,
            None => ExperimentMetadata::default(),
        };
        if let Some(nhe) = self.nhe {
            metadata = metadata.with_nhe(nhe);
        }
        if let Some(ph) = self.ph {
            metadata = metadata.with_ph(ph);
        }
        if let Some(constant) = self.constant {
            metadata = metadata.with_constant(constant);
        }
        if let Some(area) = self.area {
            metadata = metadata.with_area(area);
        }
        if let Some(resistance) = self.resistance {
            metadata = metadata.with_resistance(resistance);
        }
        metadata.validate()?;
        Ok(metadata)
    }
}

fn default_portion_size() -> NonZeroUsize {
    NonZeroUsize::new(DEFAULT_PORTION_SIZE).unwrap_or(NonZeroUsize::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_flags_override_defaults() {
        let args = MetadataArgs {
            ph: Some(7.0),
            resistance: Some(1.5),
            ..Default::default()
        };
        let metadata = args.resolve().unwrap();
        assert_eq!(metadata.ph, 7.0);
        assert_eq!(metadata.resistance, 1.5);
        assert_eq!(metadata.nhe, ExperimentMetadata::default().nhe);
    }

    #[test]
    fn test_zero_area_flag_rejected() {
        let args = MetadataArgs {
            area: Some(0.0),
            ..Default::default()
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn test_parse_run_command() {
        let cli = Cli::try_parse_from([
            "cvkit", "run", "raw.txt", "-d", "out", "-p", "100", "--area", "0.5",
        ])
        .unwrap();
        match cli.command {
            Commands::Run {
                portion_size,
                metadata,
                ..
            } => {
                assert_eq!(portion_size.get(), 100);
                assert_eq!(metadata.area, Some(0.5));
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_zero_portion_size_rejected() {
        assert!(Cli::try_parse_from(["cvkit", "split", "raw.txt", "-p", "0"]).is_err());
    }
}
