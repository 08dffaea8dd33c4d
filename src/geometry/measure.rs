use super::Projector;
use super::bounds::Bounds;
use crate::domain::GeoPoint;
use geo::{Area, LineString, Polygon};

const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

/// Size of a boundary ring in projected metres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingMeasure {
    pub area_m2: f64,
    pub perimeter_m: f64,
}

impl RingMeasure {
    pub fn hectares(&self) -> f64 {
        self.area_m2 / SQUARE_METERS_PER_HECTARE
    }
}

/// Measure a ring projected around its own bounding-box center
///
/// Returns `None` for fewer than 3 vertices.
pub fn measure_ring(ring: &[GeoPoint]) -> Option<RingMeasure> {
    if ring.len() < 3 {
        return None;
    }

    let projector = Projector::new(Bounds::from_points(ring)?.center());
    let projected = projector.project_points(ring);

    let exterior: LineString<f64> = projected
        .iter()
        .map(|&(x, y)| geo::coord! { x: x, y: y })
        .collect();
    let area_m2 = Polygon::new(exterior, Vec::new()).unsigned_area();

    let perimeter_m = projected
        .iter()
        .zip(projected.iter().cycle().skip(1))
        .map(|(a, b)| (b.0 - a.0).hypot(b.1 - a.1))
        .sum();

    Some(RingMeasure {
        area_m2,
        perimeter_m,
    })
}
