use geo::{Area, CoordsIter, MultiPolygon};

use crate::geom::repair::{RepairStats, repair_layer};

/// District attribute record, following the cadastral exchange schema
/// (`ILCE_ID` = county id, `UAVT_KODU` = national address code, `NUFUS` = population).
#[derive(Debug, Clone, PartialEq)]
pub struct District {
    pub id: i64,
    pub name: String,
    pub ilce_id: i64,
    pub tip_id: i64,
    pub uavt_kodu: i64,
    pub nufus: i64,
}

/// Parcel attribute record: cadastral parcel number plus its source-table index.
#[derive(Debug, Clone, PartialEq)]
pub struct Parcel {
    pub kad_parsel: String,
    pub mi_prinx: i64,
}

/// One input layer: attribute records paired with geometries, in file order.
///
/// `attrs` and `geoms` are parallel vectors; records are never added, removed,
/// or reordered after load. `areas` stays empty until [`Layer::annotate_areas`]
/// runs, after which it holds one planar area per record.
#[derive(Debug, Clone)]
pub struct Layer<A> {
    pub attrs: Vec<A>,
    pub geoms: Vec<MultiPolygon<f64>>,
    pub areas: Vec<f64>,
}

impl<A> Layer<A> {
    pub fn new(attrs: Vec<A>, geoms: Vec<MultiPolygon<f64>>) -> Self {
        debug_assert_eq!(attrs.len(), geoms.len());
        Self { attrs, geoms, areas: Vec::new() }
    }

    #[inline] pub fn len(&self) -> usize { self.attrs.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.attrs.is_empty() }

    /// Normalize every geometry into a valid polygon where possible.
    /// Records whose geometry stays invalid proceed best-effort and are counted.
    pub fn repair_geometries(&mut self) -> RepairStats {
        repair_layer(&mut self.geoms)
    }

    /// Compute the planar (shoelace) area of every record's geometry.
    ///
    /// Assumes projected coordinates; no reprojection happens here — see
    /// [`Layer::looks_geographic`] for the caller-side warning hook.
    pub fn annotate_areas(&mut self) {
        self.areas = self.geoms.iter().map(|geom| geom.unsigned_area()).collect();
    }

    /// Heuristic check for unprojected lon/lat input: true when every
    /// coordinate fits inside the ±180/±90 degree envelope.
    pub fn looks_geographic(&self) -> bool {
        let mut seen_any = false;
        for geom in &self.geoms {
            for coord in geom.coords_iter() {
                seen_any = true;
                if coord.x.abs() > 180.0 || coord.y.abs() > 90.0 {
                    return false;
                }
            }
        }
        seen_any
    }
}

#[cfg(test)]
mod tests {
    use geo::{Rect, coord};

    use super::*;

    fn square_layer(min: f64, max: f64) -> Layer<()> {
        let geom = MultiPolygon(vec![
            Rect::new(coord! { x: min, y: min }, coord! { x: max, y: max }).to_polygon(),
        ]);
        Layer::new(vec![()], vec![geom])
    }

    #[test]
    fn annotate_areas_fills_one_area_per_record() {
        let mut layer = square_layer(0.0, 10.0);
        layer.annotate_areas();
        assert_eq!(layer.areas, vec![100.0]);
    }

    #[test]
    fn projected_coordinates_do_not_look_geographic() {
        assert!(!square_layer(500_000.0, 500_100.0).looks_geographic());
    }

    #[test]
    fn degree_range_coordinates_look_geographic() {
        assert!(square_layer(28.0, 29.0).looks_geographic());
    }
}
