use std::collections::BTreeMap;
use std::fmt;

use super::error::{ShaderError, Stage};
use super::shader::CompiledShader;

/// Host-writable uniform types.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UniformType {
    Float,
    Vec2,
}

impl UniformType {
    /// Number of `f32` components.
    pub fn components(self) -> usize {
        match self {
            UniformType::Float => 1,
            UniformType::Vec2 => 2,
        }
    }
}

/// Resolved address of a uniform inside the program's uniform block.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UniformLocation {
    /// Byte offset from the start of the block.
    pub offset: u32,
    pub ty: UniformType,
}

impl fmt::Display for UniformLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} at offset {}", self.ty, self.offset)
    }
}

/// One stage of a linked program, ready for pipeline creation.
#[derive(Debug, Clone)]
pub struct StageSource {
    pub source: String,
    pub entry_point: String,
}

/// Vertex + fragment stages that agree on their shared uniform block.
#[derive(Debug, Clone)]
pub struct LinkedProgram {
    vertex: StageSource,
    fragment: StageSource,
    uniforms: BTreeMap<String, UniformLocation>,
    uniform_block_size: u64,
}

impl LinkedProgram {
    pub fn vertex(&self) -> &StageSource {
        &self.vertex
    }

    pub fn fragment(&self) -> &StageSource {
        &self.fragment
    }

    /// Looks up a uniform by name. `None` when neither stage declares it.
    pub fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        self.uniforms.get(name).copied()
    }

    /// Size of the uniform buffer backing the block, padded to 16 bytes.
    ///
    /// Zero when no stage declares a uniform block.
    pub fn uniform_block_size(&self) -> u64 {
        self.uniform_block_size
    }
}

/// Links a vertex and a fragment stage into one program.
///
/// Both inputs are consumed. Members the two stages both declare must agree
/// on offset and type; the program sees the union of both stages' members.
pub fn link(vertex: CompiledShader, fragment: CompiledShader) -> Result<LinkedProgram, ShaderError> {
    expect_stage(&vertex, Stage::Vertex)?;
    expect_stage(&fragment, Stage::Fragment)?;

    let mut uniforms: BTreeMap<String, UniformLocation> = BTreeMap::new();
    for (name, loc) in &vertex.uniforms.members {
        uniforms.insert(name.clone(), *loc);
    }
    for (name, loc) in &fragment.uniforms.members {
        match uniforms.get(name) {
            Some(existing) if existing != loc => {
                return Err(ShaderError::Link {
                    message: format!(
                        "uniform `{name}` is {existing} in the vertex stage but {loc} in the fragment stage"
                    ),
                });
            }
            Some(_) => {}
            None => {
                uniforms.insert(name.clone(), *loc);
            }
        }
    }

    let span = vertex.uniforms.span.max(fragment.uniforms.span);
    let uniform_block_size = u64::from(span).next_multiple_of(16);

    log::debug!(
        "linked program: {} uniform(s), {uniform_block_size}-byte block",
        uniforms.len()
    );

    Ok(LinkedProgram {
        vertex: StageSource {
            source: vertex.source,
            entry_point: vertex.entry_point,
        },
        fragment: StageSource {
            source: fragment.source,
            entry_point: fragment.entry_point,
        },
        uniforms,
        uniform_block_size,
    })
}

fn expect_stage(shader: &CompiledShader, expected: Stage) -> Result<(), ShaderError> {
    if shader.stage == expected {
        Ok(())
    } else {
        Err(ShaderError::StageMismatch {
            expected,
            found: shader.stage,
        })
    }
}

/// Locations of the uniforms the triangle program is driven by.
///
/// Resolved once after linking. A `None` entry means the program does not
/// declare that uniform and writes to it are dropped.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct UniformLocations {
    pub aspect_ratio: Option<UniformLocation>,
    pub time: Option<UniformLocation>,
    pub mouse: Option<UniformLocation>,
    pub resolution: Option<UniformLocation>,
}

impl UniformLocations {
    pub const ASPECT_RATIO: &'static str = "aspectRatio";
    pub const TIME: &'static str = "time";
    pub const MOUSE: &'static str = "mouse";
    pub const RESOLUTION: &'static str = "resolution";

    pub fn resolve(program: &LinkedProgram) -> Self {
        let lookup = |name: &str| {
            let loc = program.uniform_location(name);
            if loc.is_none() {
                log::debug!("program does not declare uniform `{name}`");
            }
            loc
        };

        Self {
            aspect_ratio: lookup(Self::ASPECT_RATIO),
            time: lookup(Self::TIME),
            mouse: lookup(Self::MOUSE),
            resolution: lookup(Self::RESOLUTION),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::compile;
    use crate::shaders::{FRAGMENT_SOURCE, VERTEX_SOURCE};

    fn embedded() -> LinkedProgram {
        let vs = compile(Stage::Vertex, VERTEX_SOURCE).unwrap();
        let fs = compile(Stage::Fragment, FRAGMENT_SOURCE).unwrap();
        link(vs, fs).unwrap()
    }

    #[test]
    fn embedded_program_locations() {
        let locs = UniformLocations::resolve(&embedded());
        assert_eq!(locs.aspect_ratio, Some(UniformLocation { offset: 0, ty: UniformType::Float }));
        assert_eq!(locs.time, Some(UniformLocation { offset: 4, ty: UniformType::Float }));
        assert_eq!(locs.mouse, Some(UniformLocation { offset: 8, ty: UniformType::Vec2 }));
        assert_eq!(locs.resolution, Some(UniformLocation { offset: 16, ty: UniformType::Vec2 }));
    }

    #[test]
    fn block_size_is_padded() {
        assert_eq!(embedded().uniform_block_size(), 32);
    }

    #[test]
    fn unknown_uniform_has_no_location() {
        assert_eq!(embedded().uniform_location("brightness"), None);
    }

    #[test]
    fn entry_points_carried_through() {
        let p = embedded();
        assert_eq!(p.vertex().entry_point, "vs_main");
        assert_eq!(p.fragment().entry_point, "fs_main");
        assert_eq!(p.vertex().source, VERTEX_SOURCE);
    }

    #[test]
    fn swapped_stages_are_rejected() {
        let vs = compile(Stage::Vertex, VERTEX_SOURCE).unwrap();
        let fs = compile(Stage::Fragment, FRAGMENT_SOURCE).unwrap();
        assert_eq!(
            link(fs, vs).unwrap_err(),
            ShaderError::StageMismatch { expected: Stage::Vertex, found: Stage::Fragment }
        );
    }

    #[test]
    fn conflicting_blocks_fail_to_link() {
        let vs_src = r#"
            struct U { time: f32, aspectRatio: f32 }
            @group(0) @binding(0) var<uniform> u: U;
            @vertex
            fn vs_main(@location(0) p: vec3<f32>) -> @builtin(position) vec4<f32> {
                return vec4<f32>(p.x * u.aspectRatio, p.y, p.z, 1.0);
            }
        "#;
        let vs = compile(Stage::Vertex, vs_src).unwrap();
        let fs = compile(Stage::Fragment, FRAGMENT_SOURCE).unwrap();
        let err = link(vs, fs).unwrap_err();
        assert!(matches!(err, ShaderError::Link { .. }), "{err:?}");
        assert!(err.to_string().contains("linking failed"));
    }

    #[test]
    fn fragment_only_members_are_merged() {
        let vs_src = r#"
            struct U { aspectRatio: f32 }
            @group(0) @binding(0) var<uniform> u: U;
            @vertex
            fn vs_main(@location(0) p: vec3<f32>) -> @builtin(position) vec4<f32> {
                return vec4<f32>(p.x * u.aspectRatio, p.y, p.z, 1.0);
            }
        "#;
        let vs = compile(Stage::Vertex, vs_src).unwrap();
        let fs = compile(Stage::Fragment, FRAGMENT_SOURCE).unwrap();
        let p = link(vs, fs).unwrap();
        assert!(p.uniform_location("mouse").is_some());
        assert_eq!(p.uniform_block_size(), 32);
    }
}
