use anyhow::Result;
use clap::Parser;

use parcel_overlay::cli::Cli;
use parcel_overlay::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::run(&cli)
}
