use std::path::Path;

use anyhow::{Context, Result};
use polars::{frame::DataFrame, prelude::AnyValue};
use rust_xlsxwriter::{Workbook, Worksheet};

pub const PAIR_SHEET: &str = "Detaylar";
pub const SUMMARY_SHEET: &str = "Özet";

/// Write both result tables as two named sheets of a single workbook.
pub fn write_workbook(path: &Path, pairs: &DataFrame, summary: &DataFrame) -> Result<()> {
    let mut workbook = Workbook::new();
    write_sheet(workbook.add_worksheet(), PAIR_SHEET, pairs)?;
    write_sheet(workbook.add_worksheet(), SUMMARY_SHEET, summary)?;
    workbook.save(path)
        .with_context(|| format!("failed to save workbook {}", path.display()))?;
    Ok(())
}

/// Header row from the column names, then one row per record.
fn write_sheet(sheet: &mut Worksheet, name: &str, df: &DataFrame) -> Result<()> {
    sheet.set_name(name)?;
    for (col, column) in df.get_columns().iter().enumerate() {
        let col = col as u16;
        sheet.write_string(0, col, column.name().as_str())?;
        for (row, value) in column.as_materialized_series().iter().enumerate() {
            let row = row as u32 + 1;
            match value {
                AnyValue::Float64(v) => sheet.write_number(row, col, v)?,
                AnyValue::Int64(v) => sheet.write_number(row, col, v as f64)?,
                AnyValue::String(v) => sheet.write_string(row, col, v)?,
                AnyValue::Null => continue,
                other => sheet.write_string(row, col, other.to_string())?,
            };
        }
    }
    Ok(())
}
