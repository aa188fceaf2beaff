//! Pointer-drag panning of the shared crop anchor.

/// Pointer pixels per percent of crop movement.
pub const DRAG_SENSITIVITY: f64 = 20.0;

/// Tracks an in-progress drag on the preview surface.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    last: Option<(f64, f64)>,
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }

    pub fn begin(&mut self, x: f64, y: f64) {
        self.last = Some((x, y));
    }

    /// Ends the drag. Also used for pointer-leave.
    pub fn end(&mut self) {
        self.last = None;
    }

    /// Apply a pointer move to `(crop_x, crop_y)`.
    ///
    /// Returns the new anchor, or `None` when no drag is in progress. The
    /// anchor moves against the pointer so the visible window pans with it.
    pub fn update(&mut self, x: f64, y: f64, crop: (f64, f64)) -> Option<(f64, f64)> {
        let (last_x, last_y) = self.last?;
        self.last = Some((x, y));

        let pan = |anchor: f64, delta: f64| (anchor - delta / DRAG_SENSITIVITY).min(100.0).max(0.0);
        Some((pan(crop.0, x - last_x), pan(crop.1, y - last_y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_without_begin_are_ignored() {
        let mut drag = DragState::default();
        assert_eq!(drag.update(10.0, 10.0, (50.0, 50.0)), None);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn dragging_right_decreases_crop_x() {
        let mut drag = DragState::default();
        drag.begin(100.0, 100.0);
        assert_eq!(drag.update(120.0, 100.0, (50.0, 50.0)), Some((49.0, 50.0)));
        // deltas are measured from the previous move, not the drag start
        assert_eq!(drag.update(120.0, 60.0, (49.0, 50.0)), Some((49.0, 52.0)));
    }

    #[test]
    fn anchor_is_clamped() {
        let mut drag = DragState::default();
        drag.begin(0.0, 0.0);
        assert_eq!(drag.update(-5000.0, 5000.0, (50.0, 50.0)), Some((100.0, 0.0)));
    }

    #[test]
    fn end_stops_the_drag() {
        let mut drag = DragState::default();
        drag.begin(0.0, 0.0);
        drag.end();
        assert_eq!(drag.update(40.0, 0.0, (50.0, 50.0)), None);
    }
}
