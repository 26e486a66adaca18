//! GPU seam for the triangle scene.
//!
//! [`TriangleScene`](crate::scene::TriangleScene) talks to the GPU only
//! through [`Backend`]. [`WgpuBackend`] is the real implementation; tests use
//! a recording mock.

mod gpu;
#[cfg(test)]
pub(crate) mod mock;

use std::ops::Range;

use anyhow::Result;
use huetri_engine::coords::Viewport;

use crate::pipeline::{LinkedProgram, Vertex, VertexLayout};
use crate::uniforms::UniformBlock;

pub use gpu::{GpuGeometry, GpuProgram, WgpuBackend};

/// GPU operations the scene needs.
///
/// Handles are owned values; dropping one releases its GPU objects.
pub trait Backend {
    /// Program object: pipeline plus its uniform storage.
    type Program;
    /// Vertex buffer plus its layout.
    type Geometry;

    /// Realizes a linked program whose vertex input is `layout`.
    fn create_program(&mut self, program: &LinkedProgram, layout: VertexLayout) -> Result<Self::Program>;

    /// Uploads `vertices` into a new, immutable vertex buffer.
    fn create_geometry(&mut self, vertices: &[Vertex], layout: VertexLayout) -> Self::Geometry;

    /// Replaces the program's uniform storage with `block`.
    fn write_uniforms(&mut self, program: &Self::Program, block: &UniformBlock);

    /// Issues one draw of `vertices` with `program` over `geometry`, restricted to `viewport`.
    fn draw(
        &mut self,
        program: &Self::Program,
        geometry: &Self::Geometry,
        viewport: Viewport,
        vertices: Range<u32>,
    );
}
