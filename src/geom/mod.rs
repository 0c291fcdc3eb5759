pub mod repair;

use geo::{BoundingRect, MultiPolygon, Rect};
use rstar::{AABB, RTree, RTreeObject};

#[derive(Debug, Clone)]
struct BoundingBox {
    idx: usize, // Position of the corresponding record in its layer
    bbox: Rect<f64>,
}

impl RTreeObject for BoundingBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bbox.min().into(), self.bbox.max().into())
    }
}

/// Bounding-box index over the parcel layer's geometries.
///
/// Built once, queried once per district. A query returns a conservative
/// superset of the truly intersecting records: bounding boxes may over-match,
/// but a record whose geometry intersects the query rect is always present.
#[derive(Debug, Clone)]
pub struct ParcelIndex {
    rtree: RTree<BoundingBox>,
}

impl ParcelIndex {
    /// Bulk-load the index. Records with an empty geometry (no bounding rect)
    /// are left out; they can intersect nothing.
    pub fn build(geoms: &[MultiPolygon<f64>]) -> Self {
        Self {
            rtree: RTree::bulk_load(
                geoms.iter().enumerate()
                    .filter_map(|(idx, geom)| geom.bounding_rect().map(|bbox| BoundingBox { idx, bbox }))
                    .collect(),
            ),
        }
    }

    /// Candidate record positions whose bounding box intersects `query`,
    /// sorted ascending. The R-tree's own hit order is unspecified; sorting
    /// keeps downstream emission order reproducible across runs.
    pub fn query(&self, query: Rect<f64>) -> Vec<usize> {
        let envelope = AABB::from_corners(query.min().into(), query.max().into());
        let mut hits: Vec<usize> = self.rtree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.idx)
            .collect();
        hits.sort_unstable();
        hits
    }
}

#[cfg(test)]
mod tests {
    use geo::coord;

    use super::*;

    fn square(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![
            Rect::new(coord! { x: min_x, y: min_y }, coord! { x: max_x, y: max_y }).to_polygon(),
        ])
    }

    #[test]
    fn query_returns_sorted_superset_of_overlapping_boxes() {
        let index = ParcelIndex::build(&[
            square(5.0, 5.0, 6.0, 6.0),
            square(0.0, 0.0, 1.0, 1.0),
            square(20.0, 20.0, 21.0, 21.0),
        ]);

        let hits = index.query(Rect::new(coord! { x: 0.5, y: 0.5 }, coord! { x: 5.5, y: 5.5 }));
        assert_eq!(hits, vec![0, 1]);
    }

    #[test]
    fn query_far_from_all_boxes_is_empty() {
        let index = ParcelIndex::build(&[square(0.0, 0.0, 1.0, 1.0)]);
        let hits = index.query(Rect::new(coord! { x: 50.0, y: 50.0 }, coord! { x: 51.0, y: 51.0 }));
        assert!(hits.is_empty());
    }

    #[test]
    fn empty_geometries_are_skipped_at_build() {
        let index = ParcelIndex::build(&[MultiPolygon::new(Vec::new()), square(0.0, 0.0, 1.0, 1.0)]);
        let hits = index.query(Rect::new(coord! { x: -1.0, y: -1.0 }, coord! { x: 2.0, y: 2.0 }));
        assert_eq!(hits, vec![1]);
    }
}
