use super::hull::{centroid, convex_hull, point_in_polygon};
use crate::domain::{GeoPoint, Pin};

/// Reference distance below which a point counts as sitting on the
/// centroid of the others, in degrees (about 5.5 m).
pub const CENTROID_THRESHOLD_DEG: f64 = 0.00005;

/// Anything with a position the pruning pass can inspect
pub trait Located {
    fn location(&self) -> GeoPoint;
}

impl Located for GeoPoint {
    fn location(&self) -> GeoPoint {
        *self
    }
}

impl Located for Pin {
    fn location(&self) -> GeoPoint {
        self.point
    }
}

/// Outcome of running the pruning pass to a fixed point
#[derive(Debug)]
pub struct Stabilized<T> {
    pub kept: Vec<T>,
    pub removed: Vec<T>,
    /// Passes run, including the final one that removed nothing
    pub passes: usize,
}

/// Whether `point` is redundant with respect to `others`
///
/// Redundant means strictly inside the hull of `others`, or, failing that,
/// within `threshold` of their centroid.
pub fn is_redundant(point: &GeoPoint, others: &[GeoPoint], threshold: f64) -> bool {
    let hull = convex_hull(others);
    if hull.len() >= 3 && point_in_polygon(point, &hull) {
        return true;
    }

    match centroid(others) {
        Some(center) => point.distance_sq(&center) < threshold * threshold,
        None => false,
    }
}

/// Prune interior and centroid-duplicate points until nothing changes
///
/// Within one pass every point is judged against the set as it stood when
/// the pass began, and all marked points go at once. Order of the survivors
/// is preserved.
pub fn stabilize<T: Located>(items: Vec<T>, threshold: f64) -> Stabilized<T> {
    let mut kept = items;
    let mut removed = Vec::new();
    let mut passes = 0;

    loop {
        passes += 1;
        let locations: Vec<GeoPoint> = kept.iter().map(Located::location).collect();

        let marks: Vec<bool> = (0..locations.len())
            .map(|i| {
                let others: Vec<GeoPoint> = locations
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, p)| *p)
                    .collect();
                is_redundant(&locations[i], &others, threshold)
            })
            .collect();

        if !marks.contains(&true) {
            break;
        }

        let (survivors, pruned): (Vec<_>, Vec<_>) = kept
            .into_iter()
            .zip(marks)
            .partition(|(_, marked)| !marked);
        kept = survivors.into_iter().map(|(item, _)| item).collect();
        removed.extend(pruned.into_iter().map(|(item, _)| item));
    }

    Stabilized {
        kept,
        removed,
        passes,
    }
}
