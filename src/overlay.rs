use geo::{Area, BooleanOps, BoundingRect, Intersects, MultiPolygon};
use rayon::prelude::*;

use crate::geom::ParcelIndex;
use crate::layer::{District, Layer, Parcel};

/// One (district, parcel) pair whose geometries intersect with positive area.
#[derive(Debug, Clone)]
pub struct PairRecord {
    pub district: District,
    pub parcel: Parcel,
    pub district_area: f64,
    pub parcel_area: f64,
    pub intersected_area: f64,
}

/// Per-district coverage total: the area of the union of every intersection
/// geometry found for the district. 0.0 for districts no parcel reaches.
#[derive(Debug, Clone)]
pub struct SummaryRecord {
    pub district_id: i64,
    pub district_name: String,
    pub covered_area: f64,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OverlayStats {
    /// Pairs that passed the bounding-box and `intersects` screens but whose
    /// exact intersection had no area: boundary-only contact, plus the
    /// fallout of geometries that survived repair invalid.
    pub empty_intersections: usize,
}

/// Everything one run produces: pair records in district-then-candidate
/// order, one summary per district in district order, and degradation counts.
#[derive(Debug, Clone)]
pub struct Coverage {
    pub pairs: Vec<PairRecord>,
    pub summaries: Vec<SummaryRecord>,
    pub stats: OverlayStats,
}

/// Compute the full district/parcel overlay.
///
/// Both layers must be area-annotated, and `index` must be built over
/// `parcels`. Districts are independent of each other, so they are processed
/// in parallel against the shared read-only index and parcel layer; the
/// per-district slices are stitched back in district order, making the output
/// identical to a sequential run.
pub fn compute(districts: &Layer<District>, parcels: &Layer<Parcel>, index: &ParcelIndex) -> Coverage {
    assert_eq!(districts.areas.len(), districts.len(), "district layer is not area-annotated");
    assert_eq!(parcels.areas.len(), parcels.len(), "parcel layer is not area-annotated");

    let per_district: Vec<_> = (0..districts.len())
        .into_par_iter()
        .map(|d| district_coverage(d, districts, parcels, index))
        .collect();

    let mut coverage = Coverage {
        pairs: Vec::new(),
        summaries: Vec::with_capacity(districts.len()),
        stats: OverlayStats::default(),
    };
    for (mut pairs, summary, empty_intersections) in per_district {
        coverage.pairs.append(&mut pairs);
        coverage.summaries.push(summary);
        coverage.stats.empty_intersections += empty_intersections;
    }
    coverage
}

/// One district against the indexed parcel layer.
fn district_coverage(
    d: usize,
    districts: &Layer<District>,
    parcels: &Layer<Parcel>,
    index: &ParcelIndex,
) -> (Vec<PairRecord>, SummaryRecord, usize) {
    let district = &districts.attrs[d];
    let geom = &districts.geoms[d];

    let mut pairs = Vec::new();
    let mut intersections: Vec<MultiPolygon<f64>> = Vec::new();
    let mut empty_intersections = 0;

    if let Some(bbox) = geom.bounding_rect() {
        for p in index.query(bbox) {
            // Exact predicate pass: drops bounding-box false positives.
            if !parcels.geoms[p].intersects(geom) {
                continue;
            }

            let intersection = geom.intersection(&parcels.geoms[p]);
            let intersected_area = intersection.unsigned_area();

            // Positive area required, not mere non-emptiness: shared edges and
            // corner touches satisfy `intersects` but are not overlap. No
            // epsilon — the threshold is exactly zero.
            if intersected_area > 0.0 {
                pairs.push(PairRecord {
                    district: district.clone(),
                    parcel: parcels.attrs[p].clone(),
                    district_area: districts.areas[d],
                    parcel_area: parcels.areas[p],
                    intersected_area,
                });
                intersections.push(intersection);
            } else {
                empty_intersections += 1;
            }
        }
    }

    // Union before measuring: parcel fragments may overlap each other inside
    // the district, and summing per-pair areas would double-count the shared
    // region. The union's area never exceeds the district's own area (modulo
    // repair artifacts).
    let covered_area = match intersections.as_slice() {
        [] => 0.0,
        [only] => only.unsigned_area(),
        [first, rest @ ..] => rest.iter()
            .fold(first.clone(), |merged, geom| merged.union(geom))
            .unsigned_area(),
    };

    let summary = SummaryRecord {
        district_id: district.id,
        district_name: district.name.clone(),
        covered_area,
    };

    (pairs, summary, empty_intersections)
}
