use winit::dpi::PhysicalSize;

/// Drawable area in physical pixels.
///
/// Renderers apply it to the render pass viewport; the aspect ratio derived
/// from it feeds the vertex-stage correction.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Long side over short side: `max(w, h) / min(w, h)`.
    ///
    /// Orientation-independent and always `>= 1.0`. Returns `None` for a
    /// zero-area viewport (e.g. a minimized window).
    pub fn aspect_ratio(self) -> Option<f32> {
        if !self.is_valid() {
            return None;
        }
        let long = self.width.max(self.height) as f32;
        let short = self.width.min(self.height) as f32;
        Some(long / short)
    }
}

impl From<PhysicalSize<u32>> for Viewport {
    #[inline]
    fn from(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_and_portrait_match() {
        let a = Viewport::new(800, 600).aspect_ratio().unwrap();
        let b = Viewport::new(600, 800).aspect_ratio().unwrap();
        assert_eq!(a, b);
        assert!((a - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn square_is_one() {
        assert_eq!(Viewport::new(512, 512).aspect_ratio(), Some(1.0));
    }

    #[test]
    fn never_below_one() {
        for w in [1u32, 2, 3, 17, 600, 800, 1920, 4096] {
            for h in [1u32, 5, 64, 599, 600, 1080, 2160] {
                let ar = Viewport::new(w, h).aspect_ratio().unwrap();
                assert!(ar >= 1.0, "{w}x{h} -> {ar}");
            }
        }
    }

    #[test]
    fn zero_area_has_no_ratio() {
        assert_eq!(Viewport::new(0, 600).aspect_ratio(), None);
        assert_eq!(Viewport::new(800, 0).aspect_ratio(), None);
        assert!(!Viewport::default().is_valid());
    }

    #[test]
    fn from_physical_size() {
        let vp: Viewport = PhysicalSize::new(1024u32, 768u32).into();
        assert_eq!(vp, Viewport::new(1024, 768));
    }
}
