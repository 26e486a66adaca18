/// Surface choices made when the GPU context is created.
///
/// Device features and limits are the wgpu defaults; nothing here needs more.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB swapchain format when the surface offers one.
    ///
    /// `false` selects a UNORM format, so shader output is stored as written.
    pub prefer_srgb: bool,

    /// Swap behavior. FIFO paces presentation to the display.
    pub present_mode: wgpu::PresentMode,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
        }
    }
}
