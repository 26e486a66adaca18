//! The triangle scene: one program, one vertex buffer, four uniforms.
//!
//! Generic over the backend's resource types so the scene outlives the
//! per-callback [`Backend`] value that created it.

use anyhow::{Context, Result};
use huetri_engine::coords::Viewport;
use huetri_engine::paint::Color;

use crate::backend::Backend;
use crate::pipeline::{self, UniformLocations, VertexLayout, TRIANGLE};
use crate::shaders::{FRAGMENT_SOURCE, VERTEX_SOURCE};
use crate::uniforms::{FrameUniforms, UniformBlock};

/// Scene-level settings.
#[derive(Debug, Copy, Clone)]
pub struct SceneConfig {
    /// Color the surface is cleared to before the triangle is drawn.
    pub clear: Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self { clear: Color::BLACK }
    }
}

/// Window state sampled at the start of a frame.
#[derive(Debug, Copy, Clone)]
pub struct SceneInput {
    /// Drawable size reported by the platform this frame.
    pub framebuffer: Viewport,
    /// Cursor position in window-space physical pixels.
    pub cursor: (f64, f64),
    /// Seconds since startup.
    pub elapsed: f64,
}

/// GPU resources and uniform state for the triangle.
pub struct TriangleScene<P, G> {
    // Declaration order is release order: geometry, then program.
    geometry: G,
    program: P,
    locations: UniformLocations,
    block: UniformBlock,
    /// Viewport set by the last resize; draws are restricted to it.
    viewport: Viewport,
    uniforms: FrameUniforms,
}

impl<P, G> TriangleScene<P, G> {
    /// Builds the scene from the embedded shaders.
    pub fn build<B>(backend: &mut B, viewport: Viewport) -> Result<Self>
    where
        B: Backend<Program = P, Geometry = G>,
    {
        Self::build_with(backend, VERTEX_SOURCE, FRAGMENT_SOURCE, viewport)
    }

    /// Compiles and links `vertex_src`/`fragment_src`, then creates the GPU
    /// program and uploads the triangle.
    ///
    /// Nothing is created on the backend when compilation or linking fails.
    pub fn build_with<B>(
        backend: &mut B,
        vertex_src: &str,
        fragment_src: &str,
        viewport: Viewport,
    ) -> Result<Self>
    where
        B: Backend<Program = P, Geometry = G>,
    {
        let linked = pipeline::build_program(vertex_src, fragment_src)?;

        let locations = UniformLocations::resolve(&linked);
        log::debug!(
            "uniforms: {}={:?} {}={:?} {}={:?} {}={:?}",
            UniformLocations::ASPECT_RATIO,
            locations.aspect_ratio,
            UniformLocations::TIME,
            locations.time,
            UniformLocations::MOUSE,
            locations.mouse,
            UniformLocations::RESOLUTION,
            locations.resolution,
        );
        if locations.resolution.is_some() {
            log::warn!(
                "program declares `{}` but it is never written; it reads as zero",
                UniformLocations::RESOLUTION
            );
        }

        let layout = VertexLayout::position_only();
        let program = backend
            .create_program(&linked, layout)
            .context("failed to create GPU program")?;
        let geometry = backend.create_geometry(&TRIANGLE, layout);

        let uniforms = FrameUniforms {
            aspect_ratio: viewport.aspect_ratio().unwrap_or(1.0),
            time: 0.0,
            mouse: [0.0, 0.0],
        };
        let mut block = UniformBlock::new(linked.uniform_block_size());
        uniforms.write_to(&mut block, &locations);
        backend.write_uniforms(&program, &block);

        log::info!(
            "triangle scene ready: {} uniform bytes, viewport {}x{}",
            linked.uniform_block_size(),
            viewport.width,
            viewport.height
        );

        Ok(Self {
            geometry,
            program,
            locations,
            block,
            viewport,
            uniforms,
        })
    }

    /// Applies a new framebuffer size: moves the viewport and uploads the
    /// new aspect ratio right away.
    ///
    /// A zero-area size moves the viewport but keeps the previous aspect ratio.
    pub fn resize<B>(&mut self, backend: &mut B, size: Viewport)
    where
        B: Backend<Program = P, Geometry = G>,
    {
        self.viewport = size;
        let Some(aspect) = size.aspect_ratio() else {
            log::debug!("zero-area resize; keeping aspect ratio {}", self.uniforms.aspect_ratio);
            return;
        };
        self.uniforms.aspect_ratio = aspect;
        self.block.set_f32(self.locations.aspect_ratio, aspect);
        backend.write_uniforms(&self.program, &self.block);
    }

    /// Recomputes every driven uniform from `input` and uploads the block.
    pub fn update<B>(&mut self, backend: &mut B, input: SceneInput)
    where
        B: Backend<Program = P, Geometry = G>,
    {
        self.uniforms = FrameUniforms::compute(
            input.framebuffer,
            input.cursor,
            input.elapsed,
            self.uniforms.aspect_ratio,
        );
        self.uniforms.write_to(&mut self.block, &self.locations);
        backend.write_uniforms(&self.program, &self.block);
    }

    /// Draws the triangle once.
    pub fn draw<B>(&self, backend: &mut B)
    where
        B: Backend<Program = P, Geometry = G>,
    {
        backend.draw(
            &self.program,
            &self.geometry,
            self.viewport,
            0..TRIANGLE.len() as u32,
        );
    }

    /// One frame: uniform update followed by the draw.
    pub fn frame<B>(&mut self, backend: &mut B, input: SceneInput)
    where
        B: Backend<Program = P, Geometry = G>,
    {
        self.update(backend, input);
        self.draw(backend);
    }

    pub fn uniforms(&self) -> FrameUniforms {
        self.uniforms
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn locations(&self) -> &UniformLocations {
        &self.locations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{Kind, Live, MockBackend, MockGeometry, MockProgram, Op};

    type MockScene = TriangleScene<MockProgram, MockGeometry>;

    fn input(w: u32, h: u32) -> SceneInput {
        SceneInput {
            framebuffer: Viewport::new(w, h),
            cursor: (0.0, 0.0),
            elapsed: 0.0,
        }
    }

    fn aspect_in(bytes: &[u8]) -> f32 {
        bytemuck::pod_read_unaligned(&bytes[0..4])
    }

    #[test]
    fn build_creates_one_of_each_and_drop_releases_all() {
        let mut backend = MockBackend::new();
        let scene = MockScene::build(&mut backend, Viewport::new(800, 600)).unwrap();

        assert_eq!(
            backend.record.borrow().live,
            Live { programs: 1, buffers: 1, vertex_arrays: 1 }
        );

        drop(scene);
        let r = backend.record.borrow();
        assert_eq!(r.live, Live::default());
        assert_eq!(r.released, vec![Kind::VertexArray, Kind::Buffer, Kind::Program]);
    }

    #[test]
    fn uploads_the_nine_triangle_floats() {
        let mut backend = MockBackend::new();
        let _scene = MockScene::build(&mut backend, Viewport::new(800, 600)).unwrap();

        let r = backend.record.borrow();
        assert_eq!(
            r.vertex_uploads,
            vec![vec![0.0, 0.5, 0.0, -0.5, -0.5, 0.0, 0.5, -0.5, 0.0]]
        );
    }

    #[test]
    fn each_frame_draws_three_vertices_once() {
        let mut backend = MockBackend::new();
        let mut scene = MockScene::build(&mut backend, Viewport::new(800, 600)).unwrap();

        for i in 0..3 {
            let before = backend.record.borrow().draws();
            scene.frame(&mut backend, SceneInput { elapsed: i as f64, ..input(800, 600) });
            assert_eq!(backend.record.borrow().draws(), before + 1);
        }

        let r = backend.record.borrow();
        let last = r.ops.last().unwrap();
        assert_eq!(
            *last,
            Op::Draw { viewport: Viewport::new(800, 600), vertices: 0..3 }
        );
    }

    #[test]
    fn uniforms_are_uploaded_before_the_draw() {
        let mut backend = MockBackend::new();
        let mut scene = MockScene::build(&mut backend, Viewport::new(800, 600)).unwrap();
        backend.record.borrow_mut().ops.clear();

        scene.frame(&mut backend, input(800, 600));

        let r = backend.record.borrow();
        assert!(matches!(r.ops.as_slice(), [Op::Uniforms(_), Op::Draw { .. }]));
    }

    #[test]
    fn mouse_matches_cursor_cast_to_f32() {
        let mut backend = MockBackend::new();
        let mut scene = MockScene::build(&mut backend, Viewport::new(800, 600)).unwrap();

        let cursor = (321.987654321, 45.000000001);
        scene.frame(&mut backend, SceneInput { cursor, elapsed: 1.5, ..input(800, 600) });

        let mouse = scene.locations().mouse.unwrap();
        let time = scene.locations().time.unwrap();
        let r = backend.record.borrow();
        let bytes = r.last_uniforms().unwrap();
        let o = mouse.offset as usize;
        let x: f32 = bytemuck::pod_read_unaligned(&bytes[o..o + 4]);
        let y: f32 = bytemuck::pod_read_unaligned(&bytes[o + 4..o + 8]);
        assert_eq!((x, y), (cursor.0 as f32, cursor.1 as f32));

        let t = time.offset as usize;
        let secs: f32 = bytemuck::pod_read_unaligned(&bytes[t..t + 4]);
        assert_eq!(secs, 1.5);
    }

    #[test]
    fn resize_uploads_aspect_for_both_orientations() {
        let mut backend = MockBackend::new();
        let mut scene = MockScene::build(&mut backend, Viewport::new(640, 480)).unwrap();

        for (w, h) in [(800, 600), (600, 800)] {
            scene.resize(&mut backend, Viewport::new(w, h));
            let r = backend.record.borrow();
            let aspect = aspect_in(r.last_uniforms().unwrap());
            assert!((aspect - 4.0 / 3.0).abs() < 1e-6, "{w}x{h} gave {aspect}");
            drop(r);
            assert_eq!(scene.viewport(), Viewport::new(w, h));
        }
    }

    #[test]
    fn resize_to_square_gives_one() {
        let mut backend = MockBackend::new();
        let mut scene = MockScene::build(&mut backend, Viewport::new(800, 600)).unwrap();

        scene.resize(&mut backend, Viewport::new(500, 500));
        assert_eq!(scene.uniforms().aspect_ratio, 1.0);
    }

    #[test]
    fn zero_area_resize_keeps_aspect_and_uploads_nothing() {
        let mut backend = MockBackend::new();
        let mut scene = MockScene::build(&mut backend, Viewport::new(800, 600)).unwrap();
        let uploads = backend.record.borrow().ops.len();

        scene.resize(&mut backend, Viewport::new(0, 0));

        assert_eq!(backend.record.borrow().ops.len(), uploads);
        assert!((scene.uniforms().aspect_ratio - 4.0 / 3.0).abs() < 1e-6);

        scene.frame(&mut backend, input(0, 0));
        assert!((scene.uniforms().aspect_ratio - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn invalid_shader_creates_nothing() {
        let mut backend = MockBackend::new();
        let result = MockScene::build_with(
            &mut backend,
            "@vertex fn vs_main( -> @builtin(position) vec4<f32> {",
            FRAGMENT_SOURCE,
            Viewport::new(800, 600),
        );

        assert!(result.is_err());
        let r = backend.record.borrow();
        assert_eq!(r.live, Live::default());
        assert!(r.released.is_empty());
        assert!(r.vertex_uploads.is_empty());
    }

    #[test]
    fn program_failure_leaves_nothing_live() {
        let mut backend = MockBackend { fail_program: true, ..MockBackend::new() };
        let result = MockScene::build(&mut backend, Viewport::new(800, 600));

        assert!(result.is_err());
        let r = backend.record.borrow();
        assert_eq!(r.live, Live::default());
        assert!(r.vertex_uploads.is_empty());
    }

    #[test]
    fn default_clear_is_opaque_black() {
        assert_eq!(SceneConfig::default().clear, Color::BLACK);
    }
}
