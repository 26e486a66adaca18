//! Engine callbacks for the triangle scene.

use anyhow::Result;
use huetri_engine::coords::Viewport;
use huetri_engine::core::{App, AppControl, FrameCtx, GpuCtx};
use winit::dpi::PhysicalSize;

use crate::backend::{GpuGeometry, GpuProgram, WgpuBackend};
use crate::scene::{SceneConfig, SceneInput, TriangleScene};

type GpuScene = TriangleScene<GpuProgram, GpuGeometry>;

pub struct TriangleApp {
    config: SceneConfig,
    /// Built in `on_start`, released in `on_exit`.
    scene: Option<GpuScene>,
}

impl TriangleApp {
    pub fn new(config: SceneConfig) -> Self {
        Self { config, scene: None }
    }
}

impl App for TriangleApp {
    fn on_start(&mut self, ctx: &mut GpuCtx<'_, '_>) -> Result<()> {
        let rctx = ctx.render_ctx();
        let mut backend = WgpuBackend::new(&rctx);
        let viewport = Viewport::from(ctx.window.framebuffer_size());
        self.scene = Some(GpuScene::build(&mut backend, viewport)?);
        Ok(())
    }

    fn on_resize(&mut self, ctx: &mut GpuCtx<'_, '_>, size: PhysicalSize<u32>) {
        let Some(scene) = self.scene.as_mut() else { return };
        let rctx = ctx.render_ctx();
        scene.resize(&mut WgpuBackend::new(&rctx), Viewport::from(size));
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
        let Some(scene) = self.scene.as_mut() else {
            return Ok(AppControl::Exit);
        };

        let input = SceneInput {
            framebuffer: Viewport::from(ctx.window.framebuffer_size()),
            cursor: ctx.input.cursor_position(),
            elapsed: ctx.time.elapsed,
        };

        ctx.render(self.config.clear, |rctx, target| {
            let mut backend = WgpuBackend::with_target(rctx, target);
            scene.frame(&mut backend, input);
        })?;
        Ok(AppControl::Continue)
    }

    fn on_exit(&mut self) {
        if self.scene.take().is_some() {
            log::info!("triangle scene released");
        }
    }
}
