//! Shapes engine output into the two result tables. Pure shaping: fixed
//! columns, row order preserved from emission order, no computation.

use anyhow::Result;
use polars::{frame::DataFrame, prelude::NamedFrom, series::Series};

use crate::overlay::{PairRecord, SummaryRecord};

/// Detail table: one row per intersecting (district, parcel) pair.
pub fn pair_table(pairs: &[PairRecord]) -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        Series::new("mahalle_ID".into(), pairs.iter().map(|p| p.district.id).collect::<Vec<_>>()).into(),
        Series::new("mahalle_ADI".into(), pairs.iter().map(|p| p.district.name.clone()).collect::<Vec<_>>()).into(),
        Series::new("mahalle_ILCE_ID".into(), pairs.iter().map(|p| p.district.ilce_id).collect::<Vec<_>>()).into(),
        Series::new("mahalle_TIP_ID".into(), pairs.iter().map(|p| p.district.tip_id).collect::<Vec<_>>()).into(),
        Series::new("mahalle_UAVT_KODU".into(), pairs.iter().map(|p| p.district.uavt_kodu).collect::<Vec<_>>()).into(),
        Series::new("mahalle_NUFUS".into(), pairs.iter().map(|p| p.district.nufus).collect::<Vec<_>>()).into(),
        Series::new("parsel_KAD_PARSEL".into(), pairs.iter().map(|p| p.parcel.kad_parsel.clone()).collect::<Vec<_>>()).into(),
        Series::new("parsel_MI_PRINX".into(), pairs.iter().map(|p| p.parcel.mi_prinx).collect::<Vec<_>>()).into(),
        Series::new("area_mahalle".into(), pairs.iter().map(|p| p.district_area).collect::<Vec<_>>()).into(),
        Series::new("area_parsel".into(), pairs.iter().map(|p| p.parcel_area).collect::<Vec<_>>()).into(),
        Series::new("intersected_area".into(), pairs.iter().map(|p| p.intersected_area).collect::<Vec<_>>()).into(),
    ])?;
    Ok(df)
}

/// Summary table: one row per district, intersecting or not.
pub fn summary_table(summaries: &[SummaryRecord]) -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        Series::new("mahalle_ID".into(), summaries.iter().map(|s| s.district_id).collect::<Vec<_>>()).into(),
        Series::new("mahalle_ADI".into(), summaries.iter().map(|s| s.district_name.clone()).collect::<Vec<_>>()).into(),
        Series::new("sum_of_intersected_area".into(), summaries.iter().map(|s| s.covered_area).collect::<Vec<_>>()).into(),
    ])?;
    Ok(df)
}
