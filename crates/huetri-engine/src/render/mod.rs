//! GPU rendering subsystem.
//!
//! Renderers receive a [`RenderCtx`] and a [`RenderTarget`] per frame and
//! issue GPU commands via wgpu. Each renderer owns its GPU resources
//! (pipelines, buffers) and releases them on drop.
//!
//! Convention:
//! - The viewport is the framebuffer size in physical pixels.
//! - The target has already been cleared when a renderer sees it.

mod ctx;

pub use ctx::{RenderCtx, RenderTarget};
