use anyhow::Result;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;

use super::ctx::{FrameCtx, GpuCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Callback order: `on_start` once, then any interleaving of
/// `on_window_event` / `on_resize` / `on_frame`, then `on_exit` once.
/// All callbacks run on the event-loop thread.
pub trait App {
    /// Called once after the window and GPU context exist.
    ///
    /// An error here aborts the runtime; `on_exit` still runs.
    fn on_start(&mut self, ctx: &mut GpuCtx<'_, '_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Called for window events, before the runtime handles them.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called after the surface has been reconfigured for a new framebuffer size.
    fn on_resize(&mut self, ctx: &mut GpuCtx<'_, '_>, size: PhysicalSize<u32>) {
        let _ = (ctx, size);
    }

    /// Called once per redraw.
    ///
    /// An error stops the runtime the same way a failed `on_start` does.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl>;

    /// Called once before the GPU context and window are destroyed.
    ///
    /// Release GPU resources here so they go before the device does.
    fn on_exit(&mut self) {}
}
