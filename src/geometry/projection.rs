use crate::domain::GeoPoint;

/// Local equirectangular projection from WGS84 to metres
///
/// - x = (lon - center_lon) * cos(center_lat) * 111320
/// - y = (lat - center_lat) * 111320
///
/// Good enough for field-sized polygons, which is all the editor measures.
#[derive(Debug, Clone)]
pub struct Projector {
    center: GeoPoint,
    cos_lat: f64,
}

impl Projector {
    /// Meters per degree at the equator
    pub const METERS_PER_DEGREE: f64 = 111320.0;

    pub fn new(center: GeoPoint) -> Self {
        Self {
            center,
            cos_lat: center.lat.to_radians().cos(),
        }
    }

    /// Project a point to (x, y) metres around the projection center
    pub fn project(&self, point: &GeoPoint) -> (f64, f64) {
        let x = (point.lon - self.center.lon) * self.cos_lat * Self::METERS_PER_DEGREE;
        let y = (point.lat - self.center.lat) * Self::METERS_PER_DEGREE;
        (x, y)
    }

    pub fn project_points(&self, points: &[GeoPoint]) -> Vec<(f64, f64)> {
        points.iter().map(|p| self.project(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projector_center() {
        let center = GeoPoint::new(-22.9, -47.06);
        let proj = Projector::new(center);
        let (x, y) = proj.project(&center);
        assert!(x.abs() < 0.01);
        assert!(y.abs() < 0.01);
    }

    #[test]
    fn test_projector_1km() {
        let proj = Projector::new(GeoPoint::new(-22.9, -47.06));

        // 0.009 degrees of latitude is about 1 km
        let (_, y) = proj.project(&GeoPoint::new(-22.9 + 0.009, -47.06));
        assert!((y - 1000.0).abs() < 50.0);
    }
}
