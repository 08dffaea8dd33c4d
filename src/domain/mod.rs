pub mod pin;
pub mod plantation;
pub mod point;

pub use pin::{Pin, PinId};
pub use plantation::{DraftError, Plantation, PlantationDraft, parse_parallel_arrays};
pub use point::GeoPoint;
