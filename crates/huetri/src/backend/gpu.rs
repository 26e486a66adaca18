use std::num::NonZeroU64;
use std::ops::Range;

use anyhow::Result;
use huetri_engine::coords::Viewport;
use huetri_engine::render::{RenderCtx, RenderTarget};
use wgpu::util::DeviceExt;

use super::Backend;
use crate::pipeline::{LinkedProgram, Vertex, VertexLayout};
use crate::uniforms::UniformBlock;

/// Uniform storage for a program: buffer + the bind group exposing it.
struct UniformBinding {
    bind_group: wgpu::BindGroup,
    buffer: wgpu::Buffer,
}

/// A linked program realized on the device.
pub struct GpuProgram {
    pipeline: wgpu::RenderPipeline,
    /// `None` when the program declares no uniform block.
    uniforms: Option<UniformBinding>,
}

/// Triangle vertex buffer. The layout half lives in the pipeline.
pub struct GpuGeometry {
    buffer: wgpu::Buffer,
    layout: VertexLayout,
}

impl GpuGeometry {
    pub fn layout(&self) -> VertexLayout {
        self.layout
    }
}

/// [`Backend`] over a wgpu device.
///
/// Built per callback from the engine contexts: [`WgpuBackend::new`] for
/// setup and resize (no target), [`WgpuBackend::with_target`] inside a frame.
pub struct WgpuBackend<'a> {
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
    surface_format: wgpu::TextureFormat,
    /// Surface size; draws never set a viewport larger than this.
    target_size: Viewport,
    target: Option<(&'a mut wgpu::CommandEncoder, &'a wgpu::TextureView)>,
}

impl<'a> WgpuBackend<'a> {
    pub fn new(ctx: &RenderCtx<'a>) -> Self {
        Self {
            device: ctx.device,
            queue: ctx.queue,
            surface_format: ctx.surface_format,
            target_size: ctx.viewport,
            target: None,
        }
    }

    pub fn with_target(ctx: &RenderCtx<'a>, target: &'a mut RenderTarget<'_>) -> Self {
        Self {
            target: Some((&mut *target.encoder, target.view)),
            ..Self::new(ctx)
        }
    }

    fn create_uniform_binding(
        &self,
        size: NonZeroU64,
        layout: &wgpu::BindGroupLayout,
    ) -> UniformBinding {
        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("huetri uniform ubo"),
            size: size.get(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("huetri uniform bind group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        UniformBinding { bind_group, buffer }
    }
}

impl Backend for WgpuBackend<'_> {
    type Program = GpuProgram;
    type Geometry = GpuGeometry;

    fn create_program(&mut self, program: &LinkedProgram, layout: VertexLayout) -> Result<GpuProgram> {
        let max_ubo = u64::from(self.device.limits().max_uniform_buffer_binding_size);
        anyhow::ensure!(
            program.uniform_block_size() <= max_ubo,
            "uniform block of {} bytes exceeds the device limit of {max_ubo}",
            program.uniform_block_size()
        );

        let vs = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("huetri vertex shader"),
            source: wgpu::ShaderSource::Wgsl(program.vertex().source.as_str().into()),
        });
        let fs = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("huetri fragment shader"),
            source: wgpu::ShaderSource::Wgsl(program.fragment().source.as_str().into()),
        });

        let uniform_size = NonZeroU64::new(program.uniform_block_size());

        let bind_group_layout = uniform_size.map(|size| {
            self.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("huetri uniform bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: Some(size),
                        },
                        count: None,
                    }],
                })
        });

        let bind_group_layouts: Vec<&wgpu::BindGroupLayout> = bind_group_layout.iter().collect();
        let pipeline_layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("huetri pipeline layout"),
                bind_group_layouts: &bind_group_layouts,
                immediate_size: 0,
            });

        let pipeline = self
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("huetri triangle pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &vs,
                    entry_point: Some(program.vertex().entry_point.as_str()),
                    compilation_options: Default::default(),
                    buffers: &[layout.to_wgpu()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &fs,
                    entry_point: Some(program.fragment().entry_point.as_str()),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.surface_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });

        // Shader modules are only needed for pipeline creation.
        drop(vs);
        drop(fs);

        let uniforms = match (uniform_size, bind_group_layout.as_ref()) {
            (Some(size), Some(bgl)) => Some(self.create_uniform_binding(size, bgl)),
            _ => None,
        };

        Ok(GpuProgram { pipeline, uniforms })
    }

    fn create_geometry(&mut self, vertices: &[Vertex], layout: VertexLayout) -> GpuGeometry {
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("huetri triangle vbo"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        GpuGeometry { buffer, layout }
    }

    fn write_uniforms(&mut self, program: &GpuProgram, block: &UniformBlock) {
        let Some(uniforms) = program.uniforms.as_ref() else { return };
        self.queue.write_buffer(&uniforms.buffer, 0, block.as_bytes());
    }

    fn draw(
        &mut self,
        program: &GpuProgram,
        geometry: &GpuGeometry,
        viewport: Viewport,
        vertices: Range<u32>,
    ) {
        let width = viewport.width.min(self.target_size.width);
        let height = viewport.height.min(self.target_size.height);
        if width == 0 || height == 0 {
            return;
        }

        let Some((encoder, view)) = self.target.as_mut() else {
            log::warn!("draw issued outside a frame; ignored");
            return;
        };

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("huetri triangle pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: *view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_viewport(0.0, 0.0, width as f32, height as f32, 0.0, 1.0);
        rpass.set_pipeline(&program.pipeline);
        if let Some(uniforms) = program.uniforms.as_ref() {
            rpass.set_bind_group(0, &uniforms.bind_group, &[]);
        }
        rpass.set_vertex_buffer(0, geometry.buffer.slice(..));
        rpass.draw(vertices, 0..1);
    }
}
