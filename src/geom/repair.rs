use geo::{BooleanOps, MultiPolygon, Validation};

/// Outcome counters from repairing one layer's geometries.
#[derive(Debug, Default, Clone, Copy)]
pub struct RepairStats {
    /// Geometries that failed validation and were reconstructed.
    pub rebuilt: usize,
    /// Geometries still invalid after reconstruction; downstream overlay
    /// operations on them may come up empty.
    pub unrepaired: usize,
}

/// Normalize a multipolygon into a valid one.
///
/// Valid input is returned unchanged. Invalid input is rebuilt by running it
/// through the boolean-overlay engine (union with the empty multipolygon),
/// which re-nodes rings and reconstructs the boundary — healing
/// self-intersections, self-touching rings, and duplicate vertices the way a
/// zero-distance offset does. Best-effort: degenerate cases may shift the
/// boundary, and some defects survive reconstruction.
pub fn repair(geom: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    if geom.is_valid() {
        geom.clone()
    } else {
        geom.union(&MultiPolygon::new(Vec::new()))
    }
}

/// Repair every geometry of a layer in place.
pub fn repair_layer(geoms: &mut [MultiPolygon<f64>]) -> RepairStats {
    let mut stats = RepairStats::default();
    for geom in geoms.iter_mut() {
        if geom.is_valid() {
            continue;
        }
        *geom = repair(geom);
        stats.rebuilt += 1;
        if !geom.is_valid() {
            stats.unrepaired += 1;
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use geo::{Area, LineString, Polygon};

    use super::*;

    fn bowtie() -> MultiPolygon<f64> {
        // Exterior crosses itself at (1, 1)
        MultiPolygon(vec![Polygon::new(
            LineString::from(vec![(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0), (0.0, 0.0)]),
            vec![],
        )])
    }

    fn unit_square() -> MultiPolygon<f64> {
        MultiPolygon(vec![Polygon::new(
            LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]),
            vec![],
        )])
    }

    #[test]
    fn valid_geometry_passes_through_unchanged() {
        let square = unit_square();
        assert_eq!(repair(&square), square);
    }

    #[test]
    fn self_intersecting_ring_is_reconstructed_into_validity() {
        let fixed = repair(&bowtie());
        assert!(fixed.is_valid());
        assert!(fixed.unsigned_area() > 0.0);
    }

    #[test]
    fn repair_layer_counts_rebuilt_geometries() {
        let mut geoms = vec![unit_square(), bowtie()];
        let stats = repair_layer(&mut geoms);
        assert_eq!(stats.rebuilt, 1);
        assert_eq!(stats.unrepaired, 0);
        assert!(geoms.iter().all(Validation::is_valid));
    }
}
