//! GPU presentation of a section.
//!
//! The particle field renders on the CPU into a [`Canvas`]. Each frame the
//! [`Presenter`] uploads those pixels into an sRGB texture and draws one
//! fullscreen triangle that composites them with the day backdrop, the card
//! panel and the navigation curtain (see [`shader`]). The egui overlay is
//! painted over it in the same pass (see [`egui_integration`]).

pub mod egui_integration;
mod shader;

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::canvas::Canvas;
use crate::color::Rgba;
use crate::error::GpuError;
use crate::layout::Rect;

pub use egui_integration::{EguiIntegration, OverlayFrame};
pub use shader::PRESENT_SHADER;

const LAYER_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Card squeeze while hugging.
pub const SQUEEZE_SCALE: f32 = 0.95;
/// Horizontal icon/card nudge while shaking, in pixels.
pub const SHAKE_OFFSET: f32 = 4.0;

/// Everything the shader needs besides the particle pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneState {
    pub background: Rgba,
    pub accent: Rgba,
    pub card: Rect,
    pub glow: bool,
    pub squeeze: bool,
    pub shake: bool,
    /// Curtain opacity in `[0, 1]`.
    pub curtain: f32,
    /// Seconds since start, drives the glow pulse.
    pub time: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Uniforms {
    background: [f32; 4],
    accent: [f32; 4],
    card: [f32; 4],
    viewport: [f32; 2],
    time: f32,
    glow: f32,
    curtain: f32,
    squeeze: f32,
    shake: f32,
    _pad: f32,
}

impl Uniforms {
    pub fn new(scene: &SceneState, viewport: [f32; 2]) -> Self {
        Self {
            background: scene.background.to_linear().to_array(),
            accent: scene.accent.to_linear().to_array(),
            card: [
                scene.card.min.x,
                scene.card.min.y,
                scene.card.max.x,
                scene.card.max.y,
            ],
            viewport,
            time: scene.time,
            glow: if scene.glow { 1.0 } else { 0.0 },
            curtain: scene.curtain.clamp(0.0, 1.0),
            squeeze: if scene.squeeze { SQUEEZE_SCALE } else { 1.0 },
            shake: if scene.shake { SHAKE_OFFSET } else { 0.0 },
            _pad: 0.0,
        }
    }
}

/// Window surface plus the composite pipeline.
pub struct Presenter {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,
    uniform_buffer: wgpu::Buffer,
    layer: wgpu::Texture,
    layer_size: (u32, u32),
    overlay: EguiIntegration,
}

impl Presenter {
    pub async fn new(window: Arc<Window>) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;
        log::info!("using adapter {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Presenter Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(GpuError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Present Uniforms"),
            contents: bytemuck::bytes_of(&Uniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Layer Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Present Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Present Shader"),
            source: wgpu::ShaderSource::Wgsl(PRESENT_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Present Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Present Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
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
            multiview: None,
            cache: None,
        });

        let layer_size = (config.width, config.height);
        let layer = create_layer(&device, layer_size);
        let bind_group = create_bind_group(&device, &bind_group_layout, &layer, &sampler, &uniform_buffer);
        let overlay = EguiIntegration::new(&device, surface_format, &window);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            bind_group_layout,
            bind_group,
            sampler,
            uniform_buffer,
            layer,
            layer_size,
            overlay,
        })
    }

    /// Let the overlay see a window event first.
    pub fn on_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> egui_winit::EventResponse {
        self.overlay.on_window_event(window, event)
    }

    /// Build this frame's overlay.
    pub fn run_overlay(&mut self, window: &Window, ui: impl FnMut(&egui::Context)) -> OverlayFrame {
        self.overlay.run(window, ui)
    }

    /// Reconfigure the surface after the window changed size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Upload `canvas`, then draw the composite and `overlay` and present.
    pub fn render(
        &mut self,
        canvas: &Canvas,
        scene: &SceneState,
        overlay: &OverlayFrame,
    ) -> Result<(), wgpu::SurfaceError> {
        // Texture deltas arrive once; upload them even if this frame is dropped.
        self.overlay.update_textures(&self.device, &self.queue, overlay);
        if !canvas.is_empty() {
            self.upload(canvas);
        }

        let uniforms = Uniforms::new(
            scene,
            [self.config.width as f32, self.config.height as f32],
        );
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Present Encoder"),
            });
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: overlay.pixels_per_point,
        };
        let overlay_commands =
            self.overlay
                .update_buffers(&self.device, &self.queue, &mut encoder, overlay, &screen);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Present Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.draw(0..3, 0..1);
            self.overlay.paint(&mut pass, overlay, &screen);
        }

        self.queue.submit(
            overlay_commands
                .into_iter()
                .chain(std::iter::once(encoder.finish())),
        );
        output.present();
        self.overlay.free_textures(overlay);
        Ok(())
    }

    /// Re-apply the current surface configuration, after `Lost`/`Outdated`.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn upload(&mut self, canvas: &Canvas) {
        let size = (canvas.width(), canvas.height());
        if size != self.layer_size {
            log::debug!("reallocating particle layer at {}x{}", size.0, size.1);
            self.layer = create_layer(&self.device, size);
            self.layer_size = size;
            self.bind_group = create_bind_group(
                &self.device,
                &self.bind_group_layout,
                &self.layer,
                &self.sampler,
                &self.uniform_buffer,
            );
        }

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.layer,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            canvas.as_bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * size.0),
                rows_per_image: Some(size.1),
            },
            wgpu::Extent3d {
                width: size.0,
                height: size.1,
                depth_or_array_layers: 1,
            },
        );
    }
}

fn create_layer(device: &wgpu::Device, (width, height): (u32, u32)) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Particle Layer"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: LAYER_FORMAT,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    })
}

fn create_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    layer: &wgpu::Texture,
    sampler: &wgpu::Sampler,
    uniforms: &wgpu::Buffer,
) -> wgpu::BindGroup {
    let view = layer.create_view(&wgpu::TextureViewDescriptor::default());
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Present Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: uniforms.as_entire_binding(),
            },
        ],
    })
}
