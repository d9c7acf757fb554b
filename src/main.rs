//! Command-line driver for risk assessment
//!
//! Reads a serialized table, runs the assessment and writes the risk
//! table next to a few human-readable phase lines:
//!
//! ```bash
//! reid_risk input.csv risk.csv --id-column Email --exclude WC
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use reid_risk::data::TableLoader;
use reid_risk::risk::{AssessmentConfig, RiskAssessor};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Re-identification risk assessment for tabular microdata"
)]
struct Args {
    /// Input table (CSV, or JSON with a .json extension)
    input: PathBuf,

    /// Output path for the risk table, same formats
    output: PathBuf,

    /// Column identifying the subject each row belongs to
    #[arg(short, long)]
    id_column: String,

    /// Minimum background knowledge size
    #[arg(short, long, default_value_t = 1)]
    min_size: usize,

    /// Column to exclude from the background knowledge (repeatable)
    #[arg(short, long = "exclude", value_name = "COLUMN")]
    exclude: Vec<String>,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if !args.quiet {
        println!("{}", "Reading input table".bold());
    }
    let table = TableLoader::load(&args.input)
        .with_context(|| format!("Failed to read input table {:?}", args.input))?;
    if !args.quiet {
        println!(
            "Loaded {} rows, {} columns from {}",
            table.n_rows(),
            table.n_cols(),
            args.input.display().to_string().cyan()
        );
        println!("{}", "Computing risk".bold());
    }

    let mut config = AssessmentConfig::new(args.id_column.clone());
    config.excluded_columns = args.exclude.clone();
    config.min_size = args.min_size;
    config.progress = !args.quiet;

    let risk = RiskAssessor::new(config).assess(&table)?;

    if !args.quiet {
        println!("{}", "Risk computed, saving table".bold());
    }
    TableLoader::save(&risk, &args.output)
        .with_context(|| format!("Failed to save risk table {:?}", args.output))?;
    if !args.quiet {
        println!(
            "Risk table saved to {}",
            args.output.display().to_string().cyan()
        );
    }

    Ok(())
}
