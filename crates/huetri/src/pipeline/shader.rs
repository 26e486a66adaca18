use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::error::{ShaderError, Stage};
use super::program::{UniformLocation, UniformType};

/// Uniform block slot shared by both stages.
pub(crate) const UNIFORM_GROUP: u32 = 0;
pub(crate) const UNIFORM_BINDING: u32 = 0;

/// A single stage that parsed and validated.
///
/// Consumed by [`link`](super::link); the naga module does not outlive linking.
#[derive(Debug)]
pub struct CompiledShader {
    pub(crate) stage: Stage,
    pub(crate) source: String,
    pub(crate) entry_point: String,
    pub(crate) uniforms: UniformBlockLayout,
}

impl CompiledShader {
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }
}

/// Reflected layout of the uniform block at `@group(0) @binding(0)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct UniformBlockLayout {
    /// `(name, location)` in declaration order.
    pub members: Vec<(String, UniformLocation)>,
    /// Struct span in bytes; 0 when the stage declares no block.
    pub span: u32,
}

/// Parses and validates `source` as WGSL for `stage`.
///
/// Diagnostics are returned, never panicked on; logging is left to the caller.
pub fn compile(stage: Stage, source: &str) -> Result<CompiledShader, ShaderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Compile {
        stage,
        message: e.emit_to_string(source),
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| ShaderError::Compile {
            stage,
            message: e.emit_to_string(source),
        })?;

    let entry_point = module
        .entry_points
        .iter()
        .find(|ep| ep.stage == stage.to_naga())
        .map(|ep| ep.name.clone())
        .ok_or(ShaderError::MissingEntryPoint { stage })?;

    let uniforms = reflect_uniform_block(&module);

    log::debug!(
        "compiled {stage} shader: entry `{entry_point}`, {} uniform(s)",
        uniforms.members.len()
    );

    Ok(CompiledShader {
        stage,
        source: source.to_owned(),
        entry_point,
        uniforms,
    })
}

fn reflect_uniform_block(module: &naga::Module) -> UniformBlockLayout {
    let block = module.global_variables.iter().find_map(|(_, var)| {
        let binding = var.binding.as_ref()?;
        let is_slot = var.space == naga::AddressSpace::Uniform
            && binding.group == UNIFORM_GROUP
            && binding.binding == UNIFORM_BINDING;
        is_slot.then_some(var.ty)
    });

    let Some(ty) = block else {
        return UniformBlockLayout::default();
    };

    let naga::TypeInner::Struct { members, span } = &module.types[ty].inner else {
        log::warn!("uniform binding is not a struct; no uniforms reflected");
        return UniformBlockLayout::default();
    };

    let members = members
        .iter()
        .filter_map(|m| {
            let name = m.name.clone()?;
            match uniform_type(&module.types[m.ty].inner) {
                Some(ty) => Some((name, UniformLocation { offset: m.offset, ty })),
                None => {
                    log::debug!("uniform `{name}` has an unsupported type; not addressable");
                    None
                }
            }
        })
        .collect();

    UniformBlockLayout { members, span: *span }
}

fn uniform_type(inner: &naga::TypeInner) -> Option<UniformType> {
    match *inner {
        naga::TypeInner::Scalar(s) if s == naga::Scalar::F32 => Some(UniformType::Float),
        naga::TypeInner::Vector {
            size: naga::VectorSize::Bi,
            scalar,
        } if scalar == naga::Scalar::F32 => Some(UniformType::Vec2),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shaders::{FRAGMENT_SOURCE, VERTEX_SOURCE};

    #[test]
    fn embedded_vertex_compiles() {
        let vs = compile(Stage::Vertex, VERTEX_SOURCE).unwrap();
        assert_eq!(vs.stage(), Stage::Vertex);
        assert_eq!(vs.entry_point(), "vs_main");
        assert_eq!(vs.uniforms.span, 24);
    }

    #[test]
    fn embedded_fragment_compiles() {
        let fs = compile(Stage::Fragment, FRAGMENT_SOURCE).unwrap();
        assert_eq!(fs.entry_point(), "fs_main");
        let names: Vec<_> = fs.uniforms.members.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["aspectRatio", "time", "mouse", "resolution"]);
    }

    #[test]
    fn syntax_error_is_reported() {
        let err = compile(Stage::Vertex, "@vertex fn vs_main( -> {").unwrap_err();
        match err {
            ShaderError::Compile { stage, message } => {
                assert_eq!(stage, Stage::Vertex);
                assert!(!message.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn type_error_is_reported() {
        let src = r#"
            @fragment
            fn fs_main() -> @location(0) vec4<f32> {
                let x: f32 = vec2<f32>(1.0, 2.0);
                return vec4<f32>(x);
            }
        "#;
        assert!(matches!(
            compile(Stage::Fragment, src),
            Err(ShaderError::Compile { stage: Stage::Fragment, .. })
        ));
    }

    #[test]
    fn wrong_stage_has_no_entry_point() {
        assert_eq!(
            compile(Stage::Fragment, VERTEX_SOURCE).unwrap_err(),
            ShaderError::MissingEntryPoint { stage: Stage::Fragment }
        );
    }

    #[test]
    fn shader_without_uniforms_reflects_empty_block() {
        let src = r#"
            @vertex
            fn vs_main(@location(0) p: vec3<f32>) -> @builtin(position) vec4<f32> {
                return vec4<f32>(p, 1.0);
            }
        "#;
        let vs = compile(Stage::Vertex, src).unwrap();
        assert_eq!(vs.uniforms, UniformBlockLayout::default());
    }
}
