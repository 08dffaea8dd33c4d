pub mod geojson;
pub mod renderer;
pub mod session;

pub use geojson::{GeoJsonSurface, Layer};
pub use renderer::BoundaryRenderer;
pub use session::EditorSession;

use crate::domain::GeoPoint;
use crate::geometry::Bounds;

/// An interactive map the editor draws on
///
/// The surface owns whatever it draws; the editor only keeps the handles it
/// was given and hands them back to `remove`.
pub trait MapSurface {
    type Handle;

    fn add_marker(&mut self, at: GeoPoint, label: u32) -> Self::Handle;
    fn draw_polyline(&mut self, from: GeoPoint, to: GeoPoint) -> Self::Handle;
    fn draw_polygon(&mut self, ring: &[GeoPoint]) -> Self::Handle;
    fn remove(&mut self, handle: Self::Handle);
    fn fit_bounds(&mut self, bounds: &Bounds);
}
