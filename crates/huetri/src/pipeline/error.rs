use std::fmt;

/// Programmable pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    pub(crate) fn to_naga(self) -> naga::ShaderStage {
        match self {
            Stage::Vertex => naga::ShaderStage::Vertex,
            Stage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Vertex => "vertex",
            Stage::Fragment => "fragment",
        })
    }
}

/// Shader compile or link failure.
///
/// `message` carries the compiler diagnostic verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderError {
    /// Source failed to parse or validate.
    Compile { stage: Stage, message: String },
    /// Source is valid but declares no entry point for its stage.
    MissingEntryPoint { stage: Stage },
    /// A compiled shader was passed to `link` in the wrong slot.
    StageMismatch { expected: Stage, found: Stage },
    /// The two stages disagree about shared program state.
    Link { message: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { stage, message } => {
                write!(f, "{stage} shader compilation failed:\n{message}")
            }
            ShaderError::MissingEntryPoint { stage } => {
                write!(f, "{stage} shader has no {stage} entry point")
            }
            ShaderError::StageMismatch { expected, found } => {
                write!(f, "expected a {expected} shader, got a {found} shader")
            }
            ShaderError::Link { message } => write!(f, "shader program linking failed:\n{message}"),
        }
    }
}

impl std::error::Error for ShaderError {}
