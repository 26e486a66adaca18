use super::types::PointerMoveEvent;

/// Cursor state for the window.
#[derive(Debug, Default)]
pub struct InputState {
    /// Last reported pointer position in physical pixels.
    ///
    /// Only moves update it, so it holds after the pointer leaves the window.
    /// `(0, 0)` until the first move.
    pointer_pos: (f64, f64),
}

impl InputState {
    pub fn pointer_moved(&mut self, ev: PointerMoveEvent) {
        self.pointer_pos = (ev.x, ev.y);
    }

    /// Last known cursor position, full precision.
    #[inline]
    pub fn cursor_position(&self) -> (f64, f64) {
        self.pointer_pos
    }
}
