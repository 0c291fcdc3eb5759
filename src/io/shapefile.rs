use std::path::Path;

use anyhow::{Context, Result, bail};
use geo::{LineString, MultiPolygon, Polygon};
use shapefile::{
    PolygonRing, Reader, Shape,
    dbase::{FieldValue, Record},
};

use crate::layer::{District, Layer, Parcel};

/// Load the district layer from a shapefile.
///
/// Required DBF columns: `ID`, `ADI`, `ILCE_ID`, `TIP_ID`, `UAVT_KODU`,
/// `NUFUS`. A missing column or a non-polygon shape is a fatal load error;
/// every record handed to the core carries a polygon.
pub fn read_districts(path: &Path) -> Result<Layer<District>> {
    let mut attrs = Vec::new();
    let mut geoms = Vec::new();
    for (shape, record) in read_layer(path)? {
        attrs.push(District {
            id: numeric_field(&record, "ID")?,
            name: text_field(&record, "ADI")?,
            ilce_id: numeric_field(&record, "ILCE_ID")?,
            tip_id: numeric_field(&record, "TIP_ID")?,
            uavt_kodu: numeric_field(&record, "UAVT_KODU")?,
            nufus: numeric_field(&record, "NUFUS")?,
        });
        geoms.push(shape_to_multipolygon(shape)?);
    }
    Ok(Layer::new(attrs, geoms))
}

/// Load the parcel layer from a shapefile.
/// Required DBF columns: `KAD_PARSEL`, `MI_PRINX`.
pub fn read_parcels(path: &Path) -> Result<Layer<Parcel>> {
    let mut attrs = Vec::new();
    let mut geoms = Vec::new();
    for (shape, record) in read_layer(path)? {
        attrs.push(Parcel {
            kad_parsel: text_field(&record, "KAD_PARSEL")?,
            mi_prinx: numeric_field(&record, "MI_PRINX")?,
        });
        geoms.push(shape_to_multipolygon(shape)?);
    }
    Ok(Layer::new(attrs, geoms))
}

/// Reads all shapes + attribute records from a given `.shp` file path.
fn read_layer(path: &Path) -> Result<Vec<(Shape, Record)>> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("failed to open shapefile {}", path.display()))?;

    let mut items = Vec::with_capacity(reader.shape_count()?);
    for result in reader.iter_shapes_and_records() {
        items.push(result.context("error reading shape + record")?);
    }
    Ok(items)
}

fn shape_to_multipolygon(shape: Shape) -> Result<MultiPolygon<f64>> {
    match shape {
        Shape::Polygon(polygon) => Ok(rings_to_geo(&polygon)),
        other => bail!(
            "unsupported shape type {:?}: both layers must contain plain polygons",
            other.shapetype()
        ),
    }
}

/// Convert shapefile rings to `geo::MultiPolygon`: each outer ring starts a
/// polygon and collects the inner rings that follow it (shapefile ring order).
fn rings_to_geo(polygon: &shapefile::Polygon) -> MultiPolygon<f64> {
    fn to_linestring(points: &[shapefile::Point]) -> LineString<f64> {
        let mut ring: LineString<f64> = points.iter().map(|p| (p.x, p.y)).collect();
        ring.close();
        ring
    }

    let mut polys = Vec::new();
    let mut exterior: Option<LineString<f64>> = None;
    let mut holes: Vec<LineString<f64>> = Vec::new();

    for ring in polygon.rings() {
        match ring {
            PolygonRing::Outer(points) => {
                if let Some(ext) = exterior.take() {
                    polys.push(Polygon::new(ext, std::mem::take(&mut holes)));
                }
                exterior = Some(to_linestring(points));
            }
            PolygonRing::Inner(points) => holes.push(to_linestring(points)),
        }
    }
    if let Some(ext) = exterior {
        polys.push(Polygon::new(ext, holes));
    }

    MultiPolygon(polys)
}

/// DBF numeric cell, whatever width the producer chose. Null counts as zero;
/// digit strings are accepted because some producers export ids as text.
fn numeric_field(record: &Record, name: &str) -> Result<i64> {
    match record.get(name) {
        Some(FieldValue::Numeric(value)) => Ok(value.unwrap_or(0.0) as i64),
        Some(FieldValue::Integer(value)) => Ok(i64::from(*value)),
        Some(FieldValue::Double(value)) => Ok(*value as i64),
        Some(FieldValue::Float(value)) => Ok(value.unwrap_or(0.0) as i64),
        Some(FieldValue::Character(Some(text))) => text.trim().parse()
            .with_context(|| format!("attribute {name} is not numeric: {text:?}")),
        Some(FieldValue::Character(None)) => Ok(0),
        Some(other) => bail!("attribute {name} has unsupported DBF type: {other:?}"),
        None => bail!("layer is missing required attribute column {name}"),
    }
}

fn text_field(record: &Record, name: &str) -> Result<String> {
    match record.get(name) {
        Some(FieldValue::Character(value)) => Ok(value.as_deref().unwrap_or("").trim().to_string()),
        Some(FieldValue::Numeric(Some(value))) => Ok(value.to_string()),
        Some(FieldValue::Numeric(None)) => Ok(String::new()),
        Some(FieldValue::Integer(value)) => Ok(value.to_string()),
        Some(other) => bail!("attribute {name} has unsupported DBF type: {other:?}"),
        None => bail!("layer is missing required attribute column {name}"),
    }
}
