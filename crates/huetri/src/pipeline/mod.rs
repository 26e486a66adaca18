//! Pipeline builder: WGSL stages → linked program with resolved uniforms,
//! plus the static triangle geometry.
//!
//! Compilation and linking run on the CPU through naga and do not need a
//! device; the backend turns a [`LinkedProgram`] into GPU objects.

mod error;
mod geometry;
mod program;
mod shader;

pub use error::{ShaderError, Stage};
pub use geometry::{Vertex, VertexLayout, TRIANGLE};
pub use program::{link, LinkedProgram, StageSource, UniformLocation, UniformLocations, UniformType};
pub use shader::{compile, CompiledShader};

/// Compiles and links the given vertex/fragment pair.
///
/// Stops at the first failing step; the error carries the compiler diagnostic.
pub fn build_program(vertex_src: &str, fragment_src: &str) -> Result<LinkedProgram, ShaderError> {
    let vs = compile(Stage::Vertex, vertex_src)?;
    let fs = compile(Stage::Fragment, fragment_src)?;
    link(vs, fs)
}
