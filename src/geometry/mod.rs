pub mod bounds;
pub mod hull;
pub mod measure;
pub mod projection;
pub mod stabilize;

pub use bounds::Bounds;
pub use hull::{centroid, convex_hull, cross, point_in_polygon, ring_edges};
pub use measure::{RingMeasure, measure_ring};
pub use projection::Projector;
pub use stabilize::{CENTROID_THRESHOLD_DEG, Located, Stabilized, stabilize};
