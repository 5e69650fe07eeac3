use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pclfilter")]
#[command(about = "Filter password-check analysis records through a stage pipeline", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a pipeline over a record file
    Run {
        /// JSON file holding an array of analysis records
        #[arg(short, long, env = "PCLFILTER_RECORDS")]
        records: PathBuf,

        /// Pipeline file (TOML, JSON or YAML)
        #[arg(short, long, env = "PCLFILTER_PIPELINE")]
        pipeline: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Log the time and record counts of every stage
        #[arg(long)]
        timing: bool,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Check a pipeline file and list its stages
    Validate {
        /// Pipeline file (TOML, JSON or YAML)
        #[arg(short, long, env = "PCLFILTER_PIPELINE")]
        pipeline: PathBuf,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },
}

impl Commands {
    pub fn verbosity(&self) -> u8 {
        match self {
            Self::Run { verbosity, .. } | Self::Validate { verbosity, .. } => *verbosity,
        }
    }
}
