//! The boundary editor: the working set of pins for one polygon
//!
//! Every mutation recomputes from scratch. When three or more pins are
//! placed, redundant pins are pruned to a fixed point and the hull is rebuilt
//! from the survivors. Display numbers come from a counter that advances on
//! each placement and is only rewound by explicit removal or clearing.

use crate::domain::{GeoPoint, Pin, PinId};
use crate::geometry::{CENTROID_THRESHOLD_DEG, convex_hull, point_in_polygon, ring_edges, stabilize};

/// What happened to a placement request
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// A pin was created. `pruned` lists pins dropped by the follow-up
    /// stabilization, possibly including the new one.
    Added { id: PinId, pruned: Vec<PinId> },
    /// The coordinate lies inside the current polygon
    InsideBoundary,
    /// The coordinate is NaN or infinite
    InvalidCoordinate,
}

impl AddOutcome {
    pub fn added(&self) -> Option<PinId> {
        match self {
            AddOutcome::Added { id, .. } => Some(*id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BoundaryEditor {
    pins: Vec<Pin>,
    hull: Vec<GeoPoint>,
    next_number: u32,
    next_id: u64,
    threshold: f64,
}

impl Default for BoundaryEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundaryEditor {
    pub fn new() -> Self {
        Self::with_threshold(CENTROID_THRESHOLD_DEG)
    }

    /// Create an editor with a custom centroid-duplicate distance in degrees
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            pins: Vec::new(),
            hull: Vec::new(),
            next_number: 1,
            next_id: 1,
            threshold,
        }
    }

    /// Pre-populate from a saved polygon
    ///
    /// Points are numbered 1..n in the given order and stabilized once.
    /// Interior rejection does not apply while loading. Non-finite points are
    /// skipped.
    pub fn from_points(points: &[GeoPoint], threshold: f64) -> Self {
        let mut editor = Self::with_threshold(threshold);
        for point in points.iter().filter(|p| p.is_finite()) {
            editor.place(*point);
        }
        let pruned = editor.refresh();
        if !pruned.is_empty() {
            log::debug!("pruned {} redundant pin(s) from loaded boundary", pruned.len());
        }
        editor
    }

    /// Pre-populate from parallel latitude/longitude arrays
    pub fn from_parallel_arrays(pontosx: &[f64], pontosy: &[f64], threshold: f64) -> Self {
        let points: Vec<GeoPoint> = pontosx
            .iter()
            .zip(pontosy)
            .map(|(&lat, &lon)| GeoPoint::new(lat, lon))
            .collect();
        Self::from_points(&points, threshold)
    }

    /// Place a pin unless it would fall inside the current polygon
    pub fn add_point(&mut self, coordinate: GeoPoint) -> AddOutcome {
        if !coordinate.is_finite() {
            log::debug!("ignoring non-finite coordinate {:?}", coordinate);
            return AddOutcome::InvalidCoordinate;
        }
        if self.has_polygon() && point_in_polygon(&coordinate, &self.hull) {
            log::debug!(
                "ignoring ({}, {}): inside current boundary",
                coordinate.lat,
                coordinate.lon
            );
            return AddOutcome::InsideBoundary;
        }

        let id = self.place(coordinate);
        let pruned: Vec<PinId> = self.refresh().into_iter().map(|pin| pin.id).collect();
        if !pruned.is_empty() {
            log::debug!("placing {} pruned {} pin(s)", id, pruned.len());
        }

        AddOutcome::Added { id, pruned }
    }

    /// Remove a pin by id, returning it. Unknown ids are a no-op.
    ///
    /// Only the hull is rebuilt afterwards; no other pin is pruned.
    pub fn remove_point(&mut self, id: PinId) -> Option<Pin> {
        let index = self.pins.iter().position(|pin| pin.id == id)?;
        let removed = self.pins.remove(index);

        self.next_number = self
            .pins
            .iter()
            .map(|pin| pin.number)
            .max()
            .map_or(1, |max| max + 1);
        self.rebuild_hull();

        Some(removed)
    }

    /// Drop every pin and reset numbering
    pub fn clear(&mut self) {
        self.pins.clear();
        self.hull.clear();
        self.next_number = 1;
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub fn pin(&self, id: PinId) -> Option<&Pin> {
        self.pins.iter().find(|pin| pin.id == id)
    }

    pub fn pin_by_number(&self, number: u32) -> Option<&Pin> {
        self.pins.iter().find(|pin| pin.number == number)
    }

    /// Current vertex list in working-set order
    pub fn points(&self) -> Vec<GeoPoint> {
        self.pins.iter().map(|pin| pin.point).collect()
    }

    /// Polygon vertices counter-clockwise, empty when no polygon exists
    pub fn hull(&self) -> &[GeoPoint] {
        &self.hull
    }

    /// Segments to draw, including the closing one
    pub fn edges(&self) -> Vec<(GeoPoint, GeoPoint)> {
        ring_edges(&self.hull)
    }

    pub fn has_polygon(&self) -> bool {
        self.hull.len() >= 3
    }

    /// Number the next placed pin will carry
    pub fn next_number(&self) -> u32 {
        self.next_number
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Latitudes and longitudes as two parallel arrays, in working-set order
    pub fn parallel_arrays(&self) -> (Vec<f64>, Vec<f64>) {
        self.pins.iter().map(|pin| (pin.point.lat, pin.point.lon)).unzip()
    }

    fn place(&mut self, point: GeoPoint) -> PinId {
        let id = PinId::new(self.next_id);
        self.next_id += 1;
        self.pins.push(Pin::new(id, point, self.next_number));
        self.next_number += 1;
        id
    }

    /// Stabilize and rebuild the hull, returning the pruned pins
    fn refresh(&mut self) -> Vec<Pin> {
        if self.pins.len() < 3 {
            self.hull.clear();
            return Vec::new();
        }

        let result = stabilize(std::mem::take(&mut self.pins), self.threshold);
        self.pins = result.kept;
        self.rebuild_hull();

        result.removed
    }

    fn rebuild_hull(&mut self) {
        let hull = convex_hull(&self.points());
        self.hull = if self.pins.len() >= 3 && hull.len() >= 3 {
            hull
        } else {
            Vec::new()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon)
    }

    fn square() -> BoundaryEditor {
        let mut editor = BoundaryEditor::new();
        for point in [p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)] {
            assert!(editor.add_point(point).added().is_some());
        }
        editor
    }

    fn numbers(editor: &BoundaryEditor) -> Vec<u32> {
        editor.pins().iter().map(|pin| pin.number).collect()
    }

    #[test]
    fn test_no_polygon_below_three_points() {
        let mut editor = BoundaryEditor::new();
        assert!(!editor.has_polygon());
        assert!(editor.edges().is_empty());

        editor.add_point(p(0.0, 0.0));
        editor.add_point(p(1.0, 1.0));
        assert_eq!(editor.len(), 2);
        assert!(editor.hull().is_empty());
        assert!(editor.edges().is_empty());
    }

    #[test]
    fn test_square_builds_polygon() {
        let editor = square();
        assert_eq!(editor.len(), 4);
        assert_eq!(editor.hull().len(), 4);
        assert_eq!(editor.edges().len(), 4);
        assert_eq!(numbers(&editor), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_interior_point_is_rejected() {
        let mut editor = square();
        let before = editor.pins().to_vec();

        assert_eq!(editor.add_point(p(5.0, 5.0)), AddOutcome::InsideBoundary);
        assert_eq!(editor.add_point(p(1.0, 8.0)), AddOutcome::InsideBoundary);
        assert_eq!(editor.pins(), before.as_slice());
        assert_eq!(editor.next_number(), 5);
    }

    #[test]
    fn test_non_finite_point_is_rejected() {
        let mut editor = BoundaryEditor::new();
        assert_eq!(
            editor.add_point(p(f64::NAN, 1.0)),
            AddOutcome::InvalidCoordinate
        );
        assert!(editor.is_empty());
    }

    #[test]
    fn test_exterior_point_grows_boundary() {
        let mut editor = square();
        let outcome = editor.add_point(p(15.0, 5.0));

        let id = outcome.added().unwrap();
        assert_eq!(editor.len(), 5);
        assert!(editor.hull().contains(&p(15.0, 5.0)));
        assert_eq!(editor.pin(id).unwrap().number, 5);
    }

    #[test]
    fn test_exterior_point_can_swallow_a_vertex() {
        let mut editor = square();
        let corner = editor.pin_by_number(2).unwrap().id;

        let outcome = editor.add_point(p(20.0, -20.0));
        let AddOutcome::Added { id, pruned } = outcome else {
            panic!("point outside the square must be placed");
        };

        assert_eq!(pruned, vec![corner]);
        assert_eq!(editor.len(), 4);
        assert!(editor.pin(corner).is_none());
        assert!(editor.hull().contains(&p(20.0, -20.0)));
        assert_eq!(editor.pin(id).unwrap().number, 5);
    }

    #[test]
    fn test_remove_keeps_numbers_and_uses_max_plus_one() {
        let mut editor = square();
        let second = editor.pin_by_number(2).unwrap().id;

        let removed = editor.remove_point(second).unwrap();
        assert_eq!(removed.point, p(10.0, 0.0));
        assert_eq!(numbers(&editor), vec![1, 3, 4]);
        assert_eq!(editor.hull().len(), 3);

        let id = editor.add_point(p(10.0, 0.0)).added().unwrap();
        assert_eq!(editor.pin(id).unwrap().number, 5);
    }

    #[test]
    fn test_remove_highest_number_rewinds_counter() {
        let mut editor = square();
        let last = editor.pin_by_number(4).unwrap().id;
        editor.remove_point(last);
        assert_eq!(editor.next_number(), 4);
    }

    #[test]
    fn test_remove_below_three_clears_polygon() {
        let mut editor = BoundaryEditor::new();
        editor.add_point(p(0.0, 0.0));
        editor.add_point(p(1.0, 0.0));
        let third = editor.add_point(p(0.0, 1.0)).added().unwrap();
        assert!(editor.has_polygon());

        editor.remove_point(third);
        assert_eq!(editor.len(), 2);
        assert!(!editor.has_polygon());
        assert!(editor.edges().is_empty());
    }

    #[test]
    fn test_remove_takes_exactly_one_pin() {
        let mut editor = BoundaryEditor::new();
        editor.add_point(p(0.0, 0.0));
        editor.add_point(p(0.0, 1.0));
        let far = editor.add_point(p(-1.0, 0.5)).added().unwrap();
        // Just off the midpoint of the first two pins, outside the triangle
        let near = editor.add_point(p(0.00004, 0.5)).added().unwrap();
        assert_eq!(editor.len(), 4);

        editor.remove_point(far).unwrap();

        // near now sits on the centroid of the others, but removal never prunes
        assert_eq!(editor.len(), 3);
        assert!(editor.pin(near).is_some());
        assert!(editor.has_polygon());
        assert_eq!(editor.hull().len(), 3);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut editor = square();
        assert!(editor.remove_point(PinId::new(999)).is_none());
        assert_eq!(editor.len(), 4);
        assert_eq!(editor.next_number(), 5);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut editor = BoundaryEditor::new();
        let first = editor.add_point(p(0.0, 0.0)).added().unwrap();
        editor.remove_point(first);
        let second = editor.add_point(p(0.0, 0.0)).added().unwrap();

        assert_ne!(first, second);
        assert_eq!(editor.pin(second).unwrap().number, 1);
    }

    #[test]
    fn test_clear_resets_numbering() {
        let mut editor = square();
        editor.clear();

        assert!(editor.is_empty());
        assert!(!editor.has_polygon());
        let id = editor.add_point(p(3.0, 3.0)).added().unwrap();
        assert_eq!(editor.pin(id).unwrap().number, 1);
    }

    #[test]
    fn test_centre_click_after_square() {
        let mut editor = square();
        editor.add_point(p(5.0, 5.0));

        assert_eq!(
            editor.points(),
            vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)]
        );
        assert_eq!(editor.next_number(), 5);
    }

    #[test]
    fn test_loaded_centre_point_is_pruned_without_renumbering() {
        let points = [p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0), p(5.0, 5.0)];
        let editor = BoundaryEditor::from_points(&points, CENTROID_THRESHOLD_DEG);

        assert_eq!(editor.points(), points[..4].to_vec());
        assert_eq!(numbers(&editor), vec![1, 2, 3, 4]);
        assert!(editor.pin_by_number(5).is_none());
        assert_eq!(editor.next_number(), 6);
    }

    #[test]
    fn test_loaded_duplicate_of_lowest_corner_drops_both_copies() {
        // The half-open ray cast counts the lowest (lat, lon) corner as
        // inside the ring it anchors, so each copy is pruned against the
        // other in the same pass.
        let corners = [p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)];
        let mut points = corners.to_vec();
        points.push(p(0.0, 0.0));

        let editor = BoundaryEditor::from_points(&points, CENTROID_THRESHOLD_DEG);

        assert_eq!(editor.points(), corners[1..].to_vec());
        assert_eq!(numbers(&editor), vec![2, 3, 4]);
        assert_eq!(editor.hull().len(), 3);
    }

    #[test]
    fn test_loaded_duplicate_of_other_corner_is_kept() {
        let corners = [p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)];
        let mut points = corners.to_vec();
        points.push(p(10.0, 10.0));

        let editor = BoundaryEditor::from_points(&points, CENTROID_THRESHOLD_DEG);

        assert_eq!(editor.len(), 5);
        assert_eq!(editor.hull().len(), 4);
    }

    #[test]
    fn test_surrounded_first_pin_is_pruned() {
        let mut editor = BoundaryEditor::new();
        editor.add_point(p(5.0, 4.0));
        editor.add_point(p(0.0, 0.0));
        editor.add_point(p(10.0, 0.0));
        assert_eq!(editor.len(), 3);

        editor.add_point(p(5.0, 10.0));
        assert_eq!(editor.len(), 3);
        assert!(editor.pin_by_number(1).is_none());
        assert_eq!(numbers(&editor), vec![2, 3, 4]);
    }

    #[test]
    fn test_parallel_arrays_round_trip_order() {
        let editor = square();
        let (xs, ys) = editor.parallel_arrays();
        assert_eq!(xs, vec![0.0, 10.0, 10.0, 0.0]);
        assert_eq!(ys, vec![0.0, 0.0, 10.0, 10.0]);

        let reloaded = BoundaryEditor::from_parallel_arrays(&xs, &ys, editor.threshold());
        assert_eq!(reloaded.points(), editor.points());
    }

    #[test]
    fn test_stabilized_editor_is_fixed_point() {
        let mut editor = BoundaryEditor::new();
        for point in [
            p(0.0, 0.0),
            p(4.0, -1.0),
            p(9.0, 2.0),
            p(7.0, 8.0),
            p(1.0, 6.0),
            p(12.0, 5.0),
        ] {
            editor.add_point(point);
        }

        let again = stabilize(editor.pins().to_vec(), editor.threshold());
        assert!(again.removed.is_empty());
        assert_eq!(again.kept, editor.pins());
    }
}
