//! Command-line interface components.

use crate::config::PipelineConfig;
use crate::constants::DEFAULT_FILE_PATTERN;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wits-processor")]
#[command(about = "Aggregate WITS per-country trade extracts into yearly summaries and connections")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Directory holding one CSV extract per country
    #[arg(short, long, global = true, default_value = "data")]
    pub data_dir: PathBuf,

    /// Extract file name pattern, {code} is replaced by the country code
    #[arg(short, long, global = true, default_value = DEFAULT_FILE_PATTERN)]
    pub pattern: String,

    /// Load the countries found in the data directory instead of the built-in list
    #[arg(long, global = true)]
    pub discover: bool,

    /// Limit concurrent extract reads (0 = all at once)
    #[arg(long, global = true, default_value_t = 0)]
    pub max_concurrent: usize,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Compact, warnings-only logging
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print trade records for a year, sorted by trade balance
    Records {
        #[arg(short, long)]
        year: i32,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print retained trade connections for a year
    Connections {
        #[arg(short, long)]
        year: i32,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show how a country code resolves in the registry
    Lookup {
        #[arg(value_name = "CODE")]
        code: String,
    },

    /// Write a year's records and connections to Parquet
    Export {
        #[arg(short, long)]
        year: i32,

        /// Output directory for the Parquet files
        #[arg(short, long, default_value = "parquet")]
        output: PathBuf,
    },
}

impl Args {
    /// Tracing level implied by the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Pipeline configuration for these arguments; `codes` overrides the
    /// built-in country list when discovery was requested
    pub fn pipeline_config(&self, codes: Option<Vec<String>>) -> PipelineConfig {
        let config = PipelineConfig::default()
            .with_data_dir(self.data_dir.clone())
            .with_file_pattern(self.pattern.clone())
            .with_max_concurrent_fetches(self.max_concurrent);

        let config = match codes {
            Some(codes) => config.with_country_codes(codes),
            None => config,
        };

        if self.quiet { config } else { config.with_progress() }
    }
}
