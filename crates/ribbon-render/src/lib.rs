use ribbon_core::{FrameView, RenderSurface, Viewport, CLEAR_RGB, MSAA_SAMPLES};
use std::ops::Range;

pub mod helpers;

use helpers::{create_msaa_target, create_vertex_buffer, pick_surface_format, strip_ranges};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];

struct MsaaTarget {
    tex: wgpu::Texture,
    view: wgpu::TextureView,
}

/// GPU resources for one ribbon field on one surface.
///
/// Positions and colours live in separate vertex buffers so each can be
/// re-uploaded only when the animation marks it dirty.
pub struct GpuState<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    position_buffer: wgpu::Buffer,
    color_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    sample_count: u32,
    msaa: Option<MsaaTarget>,
    ranges: Vec<Range<u32>>,
    clear_color: wgpu::Color,
    released: bool,
}

impl<'w> GpuState<'w> {
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'w>>,
        width: u32,
        height: u32,
        vertex_capacity: usize,
    ) -> anyhow::Result<Self> {
        let width = width.max(1);
        let height = height.max(1);
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(target)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = pick_surface_format(&caps.formats)
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sample_count = if adapter
            .get_texture_format_features(format)
            .flags
            .sample_count_supported(MSAA_SAMPLES)
        {
            MSAA_SAMPLES
        } else {
            1
        };

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("curves_shader"),
            source: wgpu::ShaderSource::Wgsl(ribbon_core::CURVES_WGSL.into()),
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("curves_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("curves_bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("curves_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let stride = std::mem::size_of::<[f32; 3]>() as u64;
        let vertex_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: stride,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &POSITION_ATTRS,
            },
            wgpu::VertexBufferLayout {
                array_stride: stride,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &COLOR_ATTRS,
            },
        ];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("curves_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineStrip,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: sample_count,
                ..Default::default()
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let position_buffer = create_vertex_buffer(&device, "positions", vertex_capacity);
        let color_buffer = create_vertex_buffer(&device, "colors", vertex_capacity);
        let msaa = (sample_count > 1).then(|| {
            let (tex, view) = create_msaa_target(&device, width, height, format, sample_count);
            MsaaTarget { tex, view }
        });

        log::info!(
            "[gpu] ready {}x{} format={:?} msaa={} vertices={}",
            width,
            height,
            format,
            sample_count,
            vertex_capacity
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            bind_group,
            position_buffer,
            color_buffer,
            vertex_capacity,
            sample_count,
            msaa,
            ranges: Vec::new(),
            clear_color: wgpu::Color {
                r: CLEAR_RGB[0] as f64,
                g: CLEAR_RGB[1] as f64,
                b: CLEAR_RGB[2] as f64,
                a: 1.0,
            },
            released: false,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if self.released || width == 0 || height == 0 {
            return;
        }
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        if let Some(old) = self.msaa.take() {
            old.tex.destroy();
            let (tex, view) = create_msaa_target(
                &self.device,
                self.config.width,
                self.config.height,
                self.config.format,
                self.sample_count,
            );
            self.msaa = Some(MsaaTarget { tex, view });
        }
    }

    fn upload(&mut self, frame: &FrameView<'_>) {
        let needed = frame.vertex_total();
        let grew = needed > self.vertex_capacity;
        if grew {
            self.position_buffer.destroy();
            self.color_buffer.destroy();
            self.position_buffer = create_vertex_buffer(&self.device, "positions", needed);
            self.color_buffer = create_vertex_buffer(&self.device, "colors", needed);
            self.vertex_capacity = needed;
        }
        let relaid = grew || self.ranges.len() != frame.curves.len();
        if relaid {
            self.ranges = strip_ranges(frame.curves.iter().map(|c| c.vertex_count()));
        }

        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: frame.view_proj(),
            }),
        );

        let stride = std::mem::size_of::<[f32; 3]>() as u64;
        for (curve, range) in frame.curves.iter().zip(&self.ranges) {
            let at = range.start as u64 * stride;
            if frame.dirty.positions || relaid {
                self.queue.write_buffer(
                    &self.position_buffer,
                    at,
                    bytemuck::cast_slice(curve.positions()),
                );
            }
            if frame.dirty.colors || relaid {
                self.queue
                    .write_buffer(&self.color_buffer, at, bytemuck::cast_slice(curve.colors()));
            }
        }
    }

    pub fn render(&mut self, frame: &FrameView<'_>) -> Result<(), wgpu::SurfaceError> {
        if self.released {
            return Ok(());
        }
        self.upload(frame);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let (target, resolve_target) = match &self.msaa {
            Some(m) => (&m.view, Some(&view)),
            None => (&view, None),
        };
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("curves_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.position_buffer.slice(..));
            rpass.set_vertex_buffer(1, self.color_buffer.slice(..));
            for range in &self.ranges {
                rpass.draw(range.clone(), 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}

impl RenderSurface for GpuState<'_> {
    fn resize(&mut self, viewport: Viewport) {
        let (w, h) = viewport.physical_size();
        self.resize_if_needed(w, h);
    }

    fn draw(&mut self, frame: &FrameView<'_>) {
        match self.render(frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface lost; reconfiguring");
                self.reconfigure();
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.position_buffer.destroy();
        self.color_buffer.destroy();
        self.uniform_buffer.destroy();
        if let Some(m) = self.msaa.take() {
            m.tex.destroy();
        }
        self.ranges.clear();
        log::info!("[gpu] released");
    }
}
