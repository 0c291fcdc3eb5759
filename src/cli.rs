use std::path::PathBuf;

use clap::{Parser, ValueEnum, ValueHint};

/// Overlay CLI (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "parcel-overlay", version, about)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// District polygon layer (.shp)
    #[arg(value_hint = ValueHint::FilePath)]
    pub districts: PathBuf,

    /// Parcel polygon layer (.shp)
    #[arg(value_hint = ValueHint::FilePath)]
    pub parcels: PathBuf,

    /// Output table file (must be a file path; "-" is rejected)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Output format; inferred from the output extension when omitted
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
pub enum OutputFormat {
    /// One workbook, two named sheets
    Xlsx,
    /// Two sibling CSV files
    Csv,
}
