// Smoke tests for the export collaborators: both writers must produce files
// for populated and empty tables alike.

use geo::{MultiPolygon, Rect, coord};
use parcel_overlay::io::{csv, xlsx};
use parcel_overlay::{District, Layer, Parcel, ParcelIndex, compute, pair_table, summary_table};

fn sample_tables() -> (polars::frame::DataFrame, polars::frame::DataFrame) {
    let square = |min: f64, max: f64| {
        MultiPolygon(vec![
            Rect::new(coord! { x: min, y: min }, coord! { x: max, y: max }).to_polygon(),
        ])
    };

    let mut districts = Layer::new(
        vec![District {
            id: 1,
            name: "Yali".to_string(),
            ilce_id: 1,
            tip_id: 2,
            uavt_kodu: 4001,
            nufus: 1200,
        }],
        vec![square(0.0, 10.0)],
    );
    districts.annotate_areas();

    let mut parcels = Layer::new(
        vec![Parcel { kad_parsel: "101/1".to_string(), mi_prinx: 1 }],
        vec![square(2.0, 7.0)],
    );
    parcels.annotate_areas();

    let index = ParcelIndex::build(&parcels.geoms);
    let coverage = compute(&districts, &parcels, &index);
    (pair_table(&coverage.pairs).unwrap(), summary_table(&coverage.summaries).unwrap())
}

#[test]
fn workbook_writer_creates_a_nonempty_file() {
    let (pairs, summary) = sample_tables();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overlay.xlsx");

    xlsx::write_workbook(&path, &pairs, &summary).unwrap();

    let metadata = std::fs::metadata(&path).unwrap();
    assert!(metadata.len() > 0);
}

#[test]
fn workbook_writer_accepts_empty_tables() {
    let pairs = pair_table(&[]).unwrap();
    let summary = summary_table(&[]).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.xlsx");

    xlsx::write_workbook(&path, &pairs, &summary).unwrap();
    assert!(path.exists());
}

#[test]
fn csv_writer_emits_the_header_row() {
    let (mut pairs, _) = sample_tables();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pairs.csv");

    csv::write_csv(&mut pairs, &path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let header = contents.lines().next().unwrap();
    assert!(header.starts_with("mahalle_ID,mahalle_ADI"));
    assert!(header.ends_with("intersected_area"));
    assert_eq!(contents.lines().count(), 2);
}
