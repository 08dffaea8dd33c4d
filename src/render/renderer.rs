use super::MapSurface;
use crate::domain::PinId;
use crate::editor::BoundaryEditor;
use crate::geometry::Bounds;
use std::collections::BTreeMap;

/// Handles of everything drawn for one editor, keyed by pin
#[derive(Debug)]
pub struct BoundaryRenderer<H> {
    markers: BTreeMap<PinId, H>,
    edges: Vec<H>,
    polygon: Option<H>,
}

impl<H> Default for BoundaryRenderer<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> BoundaryRenderer<H> {
    pub fn new() -> Self {
        Self {
            markers: BTreeMap::new(),
            edges: Vec::new(),
            polygon: None,
        }
    }

    /// Bring the surface in line with the editor
    ///
    /// 1. Dispose markers whose pin is gone
    /// 2. Add markers for pins not drawn yet
    /// 3. Redraw edges and polygon from the current hull
    /// 4. Fit the view to all placed pins
    pub fn sync<S>(&mut self, editor: &BoundaryEditor, surface: &mut S)
    where
        S: MapSurface<Handle = H>,
    {
        let stale: Vec<PinId> = self
            .markers
            .keys()
            .filter(|id| editor.pin(**id).is_none())
            .copied()
            .collect();
        for id in stale {
            self.dispose_one(id, surface);
        }

        for pin in editor.pins() {
            if !self.markers.contains_key(&pin.id) {
                let handle = surface.add_marker(pin.point, pin.number);
                self.markers.insert(pin.id, handle);
            }
        }

        self.dispose_overlays(surface);
        if editor.has_polygon() {
            self.edges = editor
                .edges()
                .into_iter()
                .map(|(from, to)| surface.draw_polyline(from, to))
                .collect();
            self.polygon = Some(surface.draw_polygon(editor.hull()));
        }

        if let Some(bounds) = Bounds::from_points(&editor.points()) {
            surface.fit_bounds(&bounds);
        }
    }

    /// Remove one pin's marker. Returns false if none was drawn.
    pub fn dispose_one<S>(&mut self, id: PinId, surface: &mut S) -> bool
    where
        S: MapSurface<Handle = H>,
    {
        match self.markers.remove(&id) {
            Some(handle) => {
                surface.remove(handle);
                true
            }
            None => false,
        }
    }

    /// Remove every marker and overlay this renderer drew
    pub fn dispose_all<S>(&mut self, surface: &mut S)
    where
        S: MapSurface<Handle = H>,
    {
        for (_, handle) in std::mem::take(&mut self.markers) {
            surface.remove(handle);
        }
        self.dispose_overlays(surface);
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn has_polygon(&self) -> bool {
        self.polygon.is_some()
    }

    fn dispose_overlays<S>(&mut self, surface: &mut S)
    where
        S: MapSurface<Handle = H>,
    {
        for handle in self.edges.drain(..) {
            surface.remove(handle);
        }
        if let Some(handle) = self.polygon.take() {
            surface.remove(handle);
        }
    }
}
