//! Input subsystem.
//!
//! Public API does not expose winit types; the runtime translates cursor
//! events into [`PointerMoveEvent`]s. Only the cursor position is tracked.

mod state;
mod types;

pub use state::InputState;
pub use types::PointerMoveEvent;
