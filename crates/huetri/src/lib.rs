//! huetri: a single hue-cycling triangle.
//!
//! The window, GPU context and frame loop come from `huetri-engine`; this
//! crate adds the shader pipeline, the uniform plumbing and the scene.

pub mod app;
pub mod backend;
pub mod pipeline;
pub mod scene;
pub mod shaders;
pub mod uniforms;

use anyhow::Result;
use huetri_engine::device::GpuInit;
use huetri_engine::window::{Runtime, RuntimeConfig};

use app::TriangleApp;
use scene::SceneConfig;

/// Opens the window and runs until it is closed.
pub fn run() -> Result<()> {
    let gpu_init = GpuInit {
        // Linear target, so shader output is written unconverted.
        prefer_srgb: false,
        ..GpuInit::default()
    };
    Runtime::run(
        RuntimeConfig::default(),
        gpu_init,
        TriangleApp::new(SceneConfig::default()),
    )
}
