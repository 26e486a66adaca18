use bytemuck::{Pod, Zeroable};

/// Position-only vertex.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
}

/// The triangle, in clip space before aspect correction.
pub const TRIANGLE: [Vertex; 3] = [
    Vertex { pos: [0.0, 0.5, 0.0] },
    Vertex { pos: [-0.5, -0.5, 0.0] },
    Vertex { pos: [0.5, -0.5, 0.0] },
];

/// Vertex buffer description: a single `vec3<f32>` position at location 0.
///
/// This is the vertex-array half of the geometry; pipelines bake it in at
/// creation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    pub stride: u64,
    pub attributes: &'static [wgpu::VertexAttribute],
}

impl VertexLayout {
    const POSITION: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub const fn position_only() -> Self {
        Self {
            stride: std::mem::size_of::<Vertex>() as u64,
            attributes: &Self::POSITION,
        }
    }

    pub fn to_wgpu(&self) -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: self.attributes,
        }
    }
}
