//! Embedded WGSL sources.
//!
//! Each stage is the shared uniform block followed by the stage body, so
//! both modules agree on the block layout by construction.

/// Vertex stage: scales x by `aspectRatio`.
pub const VERTEX_SOURCE: &str = concat!(
    include_str!("shaders/uniforms.wgsl"),
    include_str!("shaders/triangle.vert.wgsl"),
);

/// Fragment stage: hue oscillates with `time`.
pub const FRAGMENT_SOURCE: &str = concat!(
    include_str!("shaders/uniforms.wgsl"),
    include_str!("shaders/triangle.frag.wgsl"),
);

