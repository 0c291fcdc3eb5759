use std::path::Path;

use anyhow::{Result, bail};

use crate::cli::{Cli, OutputFormat};
use crate::geom::ParcelIndex;
use crate::{io, overlay, report};

/// End-to-end run: load both layers, repair and annotate them, index the
/// parcels, compute the overlay, and export the two result tables.
pub fn run(cli: &Cli) -> Result<()> {
    if cli.output == Path::new("-") {
        bail!("stdout is not supported; provide a real file path.");
    }

    let mut districts = io::shapefile::read_districts(&cli.districts)?;
    let mut parcels = io::shapefile::read_parcels(&cli.parcels)?;
    if cli.verbose > 0 {
        eprintln!("[load] {} districts, {} parcels", districts.len(), parcels.len());
    }

    // Area computation assumes a projected CRS; reprojection is out of scope,
    // so lon/lat-looking input only gets a warning.
    if districts.looks_geographic() || parcels.looks_geographic() {
        eprintln!("warning: coordinates look like lon/lat degrees; areas assume projected coordinates");
    }

    let district_repairs = districts.repair_geometries();
    let parcel_repairs = parcels.repair_geometries();
    if cli.verbose > 0 {
        eprintln!(
            "[repair] districts: {} rebuilt, {} unrepaired; parcels: {} rebuilt, {} unrepaired",
            district_repairs.rebuilt, district_repairs.unrepaired,
            parcel_repairs.rebuilt, parcel_repairs.unrepaired,
        );
    }
    let unrepaired = district_repairs.unrepaired + parcel_repairs.unrepaired;
    if unrepaired > 0 {
        eprintln!("warning: {unrepaired} geometries remain invalid after reconstruction; their overlaps may come up empty");
    }

    districts.annotate_areas();
    parcels.annotate_areas();

    let index = ParcelIndex::build(&parcels.geoms);
    let coverage = overlay::compute(&districts, &parcels, &index);
    if cli.verbose > 0 {
        eprintln!(
            "[overlay] {} pair records across {} districts ({} screened pairs had no overlap area)",
            coverage.pairs.len(), coverage.summaries.len(), coverage.stats.empty_intersections,
        );
    }

    let mut pair_df = report::pair_table(&coverage.pairs)?;
    let mut summary_df = report::summary_table(&coverage.summaries)?;

    let format = cli.format.unwrap_or_else(|| {
        match cli.output.extension().and_then(|ext| ext.to_str()) {
            Some("csv") => OutputFormat::Csv,
            _ => OutputFormat::Xlsx,
        }
    });
    match format {
        OutputFormat::Xlsx => {
            io::xlsx::write_workbook(&cli.output, &pair_df, &summary_df)?;
            println!("Results saved to {}", cli.output.display());
        }
        OutputFormat::Csv => {
            let stem = cli.output.file_stem().and_then(|s| s.to_str()).unwrap_or("overlay");
            let pairs_path = cli.output.with_file_name(format!("{stem}_pairs.csv"));
            let summary_path = cli.output.with_file_name(format!("{stem}_summary.csv"));
            io::csv::write_csv(&mut pair_df, &pairs_path)?;
            io::csv::write_csv(&mut summary_df, &summary_path)?;
            println!("Results saved to {} and {}", pairs_path.display(), summary_path.display());
        }
    }

    Ok(())
}
