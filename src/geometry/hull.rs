//! Planar primitives over lat/lon degrees
//!
//! Latitude is the x axis and longitude the y axis throughout. The editor
//! works at field scale, so no spherical correction is applied.

use crate::domain::GeoPoint;

/// Z component of (a - o) x (b - o). Positive for a counter-clockwise turn.
pub fn cross(o: &GeoPoint, a: &GeoPoint, b: &GeoPoint) -> f64 {
    (a.x() - o.x()) * (b.y() - o.y()) - (a.y() - o.y()) * (b.x() - o.x())
}

/// Convex hull by Andrew's monotone chain
///
/// Returns the hull counter-clockwise starting from the lowest (x, y) point,
/// with collinear points dropped. Inputs with fewer than 3 distinct points
/// come back as those distinct points, which is not a polygon.
pub fn convex_hull(points: &[GeoPoint]) -> Vec<GeoPoint> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x().total_cmp(&b.x()).then(a.y().total_cmp(&b.y())));
    sorted.dedup();

    if sorted.len() < 3 {
        return sorted;
    }

    let mut lower: Vec<GeoPoint> = Vec::with_capacity(sorted.len());
    for p in &sorted {
        while lower.len() >= 2 && cross(&lower[lower.len() - 2], &lower[lower.len() - 1], p) <= 0.0
        {
            lower.pop();
        }
        lower.push(*p);
    }

    let mut upper: Vec<GeoPoint> = Vec::with_capacity(sorted.len());
    for p in sorted.iter().rev() {
        while upper.len() >= 2 && cross(&upper[upper.len() - 2], &upper[upper.len() - 1], p) <= 0.0
        {
            upper.pop();
        }
        upper.push(*p);
    }

    // Each chain ends where the other begins
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Even-odd ray cast
///
/// An edge (i, j) is crossed when `(yi > y) != (yj > y)` and
/// `x < xj + (xi - xj) * (y - yj) / (yi - yj)`. Points on the boundary may
/// land on either side; callers treat that as "not strictly inside".
pub fn point_in_polygon(point: &GeoPoint, polygon: &[GeoPoint]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let (x, y) = (point.x(), point.y());
    let mut inside = false;
    let mut j = polygon.len() - 1;

    for i in 0..polygon.len() {
        let (xi, yi) = (polygon[i].x(), polygon[i].y());
        let (xj, yj) = (polygon[j].x(), polygon[j].y());

        if (yi > y) != (yj > y) && x < xj + (xi - xj) * (y - yj) / (yi - yj) {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Arithmetic mean of the points, `None` when empty
pub fn centroid(points: &[GeoPoint]) -> Option<GeoPoint> {
    if points.is_empty() {
        return None;
    }

    let n = points.len() as f64;
    let (sum_x, sum_y) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x(), sy + p.y()));

    Some(GeoPoint::new(sum_x / n, sum_y / n))
}

/// Segments between consecutive vertices, closing back to the first
///
/// Empty unless the ring has at least 3 vertices.
pub fn ring_edges(ring: &[GeoPoint]) -> Vec<(GeoPoint, GeoPoint)> {
    if ring.len() < 3 {
        return Vec::new();
    }

    ring.iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(a, b)| (*a, *b))
        .collect()
}
