//! Pointer state shared between the window event loop and the renderer.

/// Pointer event classes delivered by the host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Pressed,
    Released,
    Moved,
}

/// Last observed pointer state, in raw window coordinates. Mutated only by
/// [`InputState::pointer_event`], read by the frame controller.
#[derive(Debug, Default)]
pub struct InputState {
    position: Option<(f32, f32)>,
    dragging: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pointer event. `Pressed` starts a drag, `Released` ends it,
    /// `Moved` only updates the position.
    pub fn pointer_event(&mut self, x: f32, y: f32, action: PointerAction) {
        self.position = Some((x, y));
        match action {
            PointerAction::Pressed => self.dragging = true,
            PointerAction::Released => self.dragging = false,
            PointerAction::Moved => {}
        }
    }

    /// Records a button transition at the last known position, falling back
    /// to the window origin when no move has been seen yet. Returns the
    /// position the event was recorded at.
    pub fn pointer_button(&mut self, action: PointerAction) -> (f32, f32) {
        let (x, y) = self.position.unwrap_or((0.0, 0.0));
        self.pointer_event(x, y, action);
        (x, y)
    }

    /// The last pointer position, or `None` before any pointer event has been
    /// delivered (nothing cursor-related is drawn in that case).
    pub fn position(&self) -> Option<(f32, f32)> {
        self.position
    }

    pub fn dragging(&self) -> bool {
        self.dragging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_position_before_first_event() {
        let input = InputState::new();
        assert_eq!(input.position(), None);
        assert!(!input.dragging());
    }

    #[test]
    fn test_drag_spans_press_to_release() {
        let mut input = InputState::new();
        input.pointer_event(10.0, 20.0, PointerAction::Pressed);
        assert!(input.dragging());
        input.pointer_event(15.0, 25.0, PointerAction::Moved);
        assert!(input.dragging());
        input.pointer_event(15.0, 25.0, PointerAction::Released);
        assert!(!input.dragging());
    }

    #[test]
    fn test_click_without_movement() {
        let mut input = InputState::new();
        input.pointer_event(5.0, 5.0, PointerAction::Pressed);
        assert!(input.dragging());
        input.pointer_event(5.0, 5.0, PointerAction::Released);
        assert!(!input.dragging());
        assert_eq!(input.position(), Some((5.0, 5.0)));
    }

    #[test]
    fn test_button_before_any_move_still_drags() {
        let mut input = InputState::new();
        let at = input.pointer_button(PointerAction::Pressed);
        assert!(input.dragging());
        assert_eq!(at, (0.0, 0.0));
        input.pointer_button(PointerAction::Released);
        assert!(!input.dragging());
        assert_eq!(input.position(), Some((0.0, 0.0)));
    }

    #[test]
    fn test_button_reuses_last_moved_position() {
        let mut input = InputState::new();
        input.pointer_event(7.0, 8.0, PointerAction::Moved);
        let at = input.pointer_button(PointerAction::Pressed);
        assert_eq!(at, (7.0, 8.0));
        assert!(input.dragging());
    }

    #[test]
    fn test_move_does_not_toggle_drag() {
        let mut input = InputState::new();
        input.pointer_event(1.0, 1.0, PointerAction::Moved);
        assert!(!input.dragging());
        input.pointer_event(1.0, 1.0, PointerAction::Pressed);
        input.pointer_event(2.0, 2.0, PointerAction::Moved);
        assert!(input.dragging());
        assert_eq!(input.position(), Some((2.0, 2.0)));
    }
}
