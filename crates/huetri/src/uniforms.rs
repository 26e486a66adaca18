//! Host-side uniform state.
//!
//! [`FrameUniforms`] is recomputed every frame from window state and written
//! into a [`UniformBlock`], the CPU mirror of the program's uniform buffer.

use huetri_engine::coords::Viewport;

use crate::pipeline::{UniformLocation, UniformLocations, UniformType};

/// Per-frame uniform values.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameUniforms {
    pub aspect_ratio: f32,
    /// Seconds since startup.
    pub time: f32,
    /// Cursor position in window-space physical pixels.
    pub mouse: [f32; 2],
}

impl FrameUniforms {
    /// Builds the uniforms for one frame.
    ///
    /// `last_aspect` is kept when the viewport has zero area.
    pub fn compute(viewport: Viewport, cursor: (f64, f64), elapsed: f64, last_aspect: f32) -> Self {
        Self {
            aspect_ratio: viewport.aspect_ratio().unwrap_or(last_aspect),
            time: elapsed as f32,
            mouse: [cursor.0 as f32, cursor.1 as f32],
        }
    }

    /// Writes every value that has a location into `block`.
    pub fn write_to(&self, block: &mut UniformBlock, locs: &UniformLocations) {
        block.set_f32(locs.aspect_ratio, self.aspect_ratio);
        block.set_vec2(locs.mouse, self.mouse);
        block.set_f32(locs.time, self.time);
    }
}

/// Byte image of a uniform block, uploaded verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformBlock {
    bytes: Vec<u8>,
}

impl UniformBlock {
    /// Zero-initialized block of `size` bytes.
    pub fn new(size: u64) -> Self {
        Self {
            bytes: vec![0; size as usize],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Writes a float. `None` locations are ignored.
    pub fn set_f32(&mut self, loc: Option<UniformLocation>, value: f32) {
        self.write(loc, UniformType::Float, &[value]);
    }

    /// Writes a 2-component vector. `None` locations are ignored.
    pub fn set_vec2(&mut self, loc: Option<UniformLocation>, value: [f32; 2]) {
        self.write(loc, UniformType::Vec2, &value);
    }

    pub fn get_f32(&self, loc: UniformLocation) -> Option<f32> {
        if loc.ty != UniformType::Float {
            return None;
        }
        self.component(loc.offset as usize)
    }

    pub fn get_vec2(&self, loc: UniformLocation) -> Option<[f32; 2]> {
        if loc.ty != UniformType::Vec2 {
            return None;
        }
        let o = loc.offset as usize;
        Some([self.component(o)?, self.component(o + 4)?])
    }

    fn write(&mut self, loc: Option<UniformLocation>, expected: UniformType, values: &[f32]) {
        debug_assert_eq!(values.len(), expected.components());
        let Some(loc) = loc else { return };
        if loc.ty != expected {
            log::warn!("uniform type mismatch: wrote {expected:?} to {loc}");
            return;
        }
        let start = loc.offset as usize;
        let Some(dst) = self.bytes.get_mut(start..start + values.len() * 4) else {
            log::warn!("uniform write past end of {}-byte block: {loc}", self.bytes.len());
            return;
        };
        dst.copy_from_slice(bytemuck::cast_slice(values));
    }

    fn component(&self, offset: usize) -> Option<f32> {
        self.bytes.get(offset..offset + 4).map(bytemuck::pod_read_unaligned)
    }
}
