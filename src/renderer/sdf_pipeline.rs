//! SDF-based WebGPU render pipeline
//!
//! Renders the arena and every ball in the fragment shader using signed
//! distance fields over a single fullscreen triangle.

use std::rc::Rc;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::{BACKGROUND, BallSprite, OUTSIDE, Renderer};
use crate::error::{Error, Result};
use crate::sim::Arena;

/// Maximum number of balls uploaded per frame
const MAX_BALLS: usize = 1024;

// ============================================================================
// GPU DATA STRUCTURES (must match shader)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    resolution: [f32; 2], // offset 0
    arena_size: [f32; 2], // offset 8
    tint: [f32; 4],       // offset 16
    background: [f32; 4], // offset 32
    outside: [f32; 4],    // offset 48
    ball_count: u32,      // offset 64
    edge_softness: f32,   // offset 68
    _pad: [f32; 2],       // pad to 80 bytes
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct BallData {
    center: [f32; 2],
    radius: f32,
    _pad: f32,
}

// ============================================================================
// SDF RENDER STATE
// ============================================================================

pub struct SdfRenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,

    globals_buffer: wgpu::Buffer,
    balls_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    sprite: Rc<BallSprite>,
    arena: Arena,
    /// Circles queued since the last present
    pending: Vec<BallData>,

    pub size: (u32, u32),
}

impl SdfRenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        arena: Arena,
        sprite: Rc<BallSprite>,
    ) -> Result<Self> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("sdf-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await
            .map_err(|e| Error::Startup(format!("failed to create device: {}", e)))?;

        let surface_caps = surface.get_capabilities(adapter);
        log::info!("Surface formats: {:?}", surface_caps.formats);

        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| Error::Startup("surface reports no formats".into()))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        log::info!("Using surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sdf_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("sdf_shader.wgsl").into()),
        });

        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals"),
            contents: bytemuck::bytes_of(&Self::globals(
                (width, height),
                &arena,
                &sprite,
                0,
            )),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let balls_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("balls"),
            size: (std::mem::size_of::<BallData>() * MAX_BALLS) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sdf_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sdf_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: balls_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sdf_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sdf_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[], // No vertex buffers - fullscreen triangle
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::info!("SDF pipeline ready ({}x{})", width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            globals_buffer,
            balls_buffer,
            bind_group,
            sprite,
            arena,
            pending: Vec::with_capacity(MAX_BALLS),
            size: (width, height),
        })
    }

    fn globals(size: (u32, u32), arena: &Arena, sprite: &BallSprite, ball_count: u32) -> Globals {
        Globals {
            resolution: [size.0 as f32, size.1 as f32],
            arena_size: [arena.width as f32, arena.height as f32],
            tint: sprite.tint,
            background: BACKGROUND,
            outside: OUTSIDE,
            ball_count,
            edge_softness: sprite.edge_softness,
            _pad: [0.0; 2],
        }
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Upload queued circles and draw them
    fn render(&mut self) -> std::result::Result<(), wgpu::SurfaceError> {
        if self.pending.len() > MAX_BALLS {
            log::warn!(
                "{} balls queued, drawing the first {}",
                self.pending.len(),
                MAX_BALLS
            );
            self.pending.truncate(MAX_BALLS);
        }
        let ball_count = self.pending.len() as u32;

        let globals = Self::globals(self.size, &self.arena, &self.sprite, ball_count);
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
        if !self.pending.is_empty() {
            self.queue
                .write_buffer(&self.balls_buffer, 0, bytemuck::cast_slice(&self.pending));
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("sdf_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sdf_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Fullscreen triangle
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

impl Renderer for SdfRenderState {
    fn draw_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.pending.push(BallData {
            center: [(x + radius) as f32, (y + radius) as f32],
            radius: radius as f32,
            _pad: 0.0,
        });
    }

    fn present(&mut self) {
        match self.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) => {
                self.resize(self.size.0, self.size.1);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
        self.pending.clear();
    }
}
