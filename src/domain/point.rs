use serde::{Deserialize, Serialize};

/// A location on the Earth's surface in WGS84 degrees.
///
/// Equality is exact `f64` identity. Geometry routines treat latitude as the
/// x axis and longitude as the y axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn x(&self) -> f64 {
        self.lat
    }

    pub fn y(&self) -> f64 {
        self.lon
    }

    /// Both coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Squared planar distance in degrees
    pub fn distance_sq(&self, other: &GeoPoint) -> f64 {
        let dx = self.lat - other.lat;
        let dy = self.lon - other.lon;
        dx * dx + dy * dy
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

impl From<GeoPoint> for (f64, f64) {
    fn from(point: GeoPoint) -> Self {
        (point.lat, point.lon)
    }
}
