//! Coordinate types shared by the runtime and renderers.
//!
//! Canonical GPU-facing space:
//! - Physical pixels (framebuffer size, not DPI-scaled window size)
//! - Origin top-left
//! - +X right, +Y down

mod viewport;

pub use viewport::Viewport;
