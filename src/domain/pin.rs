use super::GeoPoint;
use std::fmt;

/// Stable identifier of a placed pin, never reused within one editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PinId(u64);

impl PinId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pin-{}", self.0)
    }
}

/// A user-placed point with identity and display order
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    pub id: PinId,
    pub point: GeoPoint,
    /// 1-based display number assigned at placement
    pub number: u32,
}

impl Pin {
    pub fn new(id: PinId, point: GeoPoint, number: u32) -> Self {
        Self { id, point, number }
    }
}
