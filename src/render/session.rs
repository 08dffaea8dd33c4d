use super::{BoundaryRenderer, MapSurface};
use crate::domain::{GeoPoint, Pin, PinId};
use crate::editor::{AddOutcome, BoundaryEditor};

/// One editing session: an editor bound to the single live map surface
///
/// The surface is owned by the session. Starting over goes through
/// [`EditorSession::reopen`] or [`EditorSession::close`], both of which
/// dispose every layer drawn so far before the surface is reused.
pub struct EditorSession<S: MapSurface> {
    editor: BoundaryEditor,
    renderer: BoundaryRenderer<S::Handle>,
    surface: S,
}

impl<S: MapSurface> EditorSession<S> {
    pub fn open(surface: S, editor: BoundaryEditor) -> Self {
        let mut session = Self {
            editor,
            renderer: BoundaryRenderer::new(),
            surface,
        };
        session.sync();
        session
    }

    /// Tear this session down and start a new one on the same surface
    pub fn reopen(self, editor: BoundaryEditor) -> Self {
        Self::open(self.close(), editor)
    }

    /// Dispose everything drawn and hand the surface back
    pub fn close(mut self) -> S {
        self.renderer.dispose_all(&mut self.surface);
        self.surface
    }

    pub fn add_point(&mut self, coordinate: GeoPoint) -> AddOutcome {
        let outcome = self.editor.add_point(coordinate);
        if outcome.added().is_some() {
            self.sync();
        }
        outcome
    }

    pub fn remove_point(&mut self, id: PinId) -> Option<Pin> {
        let removed = self.editor.remove_point(id)?;
        self.sync();
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.editor.clear();
        self.renderer.dispose_all(&mut self.surface);
    }

    pub fn editor(&self) -> &BoundaryEditor {
        &self.editor
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn sync(&mut self) {
        self.renderer.sync(&self.editor, &mut self.surface);
    }
}
