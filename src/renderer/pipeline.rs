//! WebGPU sprite pipeline setup

use std::collections::HashMap;
use std::fmt;

use glam::Vec2;
use wgpu::util::DeviceExt;

use super::batch::SpriteBatch;
use super::textures::TextureImage;
use super::vertex::{CLEAR_COLOR, SpriteVertex};
use crate::error::ResourceError;
use crate::resources::{ResourceTable, SHADER_SPRITE, ShaderHandle, TextureHandle};

/// GPU setup failure
#[derive(Debug)]
pub enum RenderInitError {
    Device(wgpu::RequestDeviceError),
    /// Surface reports no usable formats
    UnsupportedSurface,
    Resource(ResourceError),
}

impl fmt::Display for RenderInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderInitError::Device(e) => write!(f, "failed to create device: {}", e),
            RenderInitError::UnsupportedSurface => write!(f, "surface has no supported formats"),
            RenderInitError::Resource(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RenderInitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderInitError::Device(e) => Some(e),
            RenderInitError::Resource(e) => Some(e),
            RenderInitError::UnsupportedSurface => None,
        }
    }
}

impl From<wgpu::RequestDeviceError> for RenderInitError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        RenderInitError::Device(e)
    }
}

impl From<ResourceError> for RenderInitError {
    fn from(e: ResourceError) -> Self {
        RenderInitError::Resource(e)
    }
}

/// Main render state
pub struct SpriteRenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    pub shader: ShaderHandle,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    /// One bind group per uploaded texture
    textures: HashMap<TextureHandle, wgpu::BindGroup>,
    vertex_buffer: wgpu::Buffer,
    /// Viewport size in pixels
    pub size: (u32, u32),
    /// Logical playfield size the sprites are laid out in
    pub arena: Vec2,
}

impl SpriteRenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        arena: Vec2,
        resources: &ResourceTable,
    ) -> Result<Self, RenderInitError> {
        let shader_handle = resources.shader(SHADER_SPRITE)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("breakout-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(adapter);
        log::info!("Surface formats: {:?}", surface_caps.formats);

        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderInitError::UnsupportedSurface)?;
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
            label: Some("sprite_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("sprite.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sprite_bind_group_layout"),
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
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sprite_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sprite_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sprite_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[SpriteVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
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

        // Placeholder until the first frame uploads real vertices
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sprite_vertices"),
            contents: bytemuck::cast_slice(&[SpriteVertex::new([0.0; 2], [0.0; 2], [1.0; 4])]),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            shader: shader_handle,
            bind_group_layout,
            sampler,
            textures: HashMap::new(),
            vertex_buffer,
            size: (width, height),
            arena,
        })
    }

    /// Upload pixels for a texture handle, replacing any previous upload
    pub fn upload_texture(&mut self, handle: TextureHandle, image: &TextureImage) {
        let extent = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("sprite_texture"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            extent,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sprite_bind_group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        self.textures.insert(handle, bind_group);
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Upload the batch and draw it, one draw call per texture run
    pub fn render(&mut self, batch: &SpriteBatch) -> Result<(), wgpu::SurfaceError> {
        let ndc_vertices: Vec<SpriteVertex> = batch
            .vertices()
            .iter()
            .map(|v| SpriteVertex {
                position: pixel_to_ndc(v.position, self.arena),
                ..*v
            })
            .collect();

        if !ndc_vertices.is_empty() {
            self.vertex_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("sprite_vertices"),
                    contents: bytemuck::cast_slice(&ndc_vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sprite_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if !ndc_vertices.is_empty() {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                for run in batch.runs() {
                    let Some(bind_group) = self.textures.get(&run.texture) else {
                        log::trace!("Skipping sprites with unloaded texture {:?}", run.texture);
                        continue;
                    };
                    render_pass.set_bind_group(0, bind_group, &[]);
                    render_pass.draw(run.start..run.start + run.count, 0..1);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// Map playfield pixels (top-left origin, y down) onto clip space
pub fn pixel_to_ndc(position: [f32; 2], arena: Vec2) -> [f32; 2] {
    [
        position[0] / arena.x * 2.0 - 1.0,
        1.0 - position[1] / arena.y * 2.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_to_ndc_corners() {
        let arena = Vec2::new(800.0, 600.0);
        assert_eq!(pixel_to_ndc([0.0, 0.0], arena), [-1.0, 1.0]);
        assert_eq!(pixel_to_ndc([800.0, 600.0], arena), [1.0, -1.0]);
        assert_eq!(pixel_to_ndc([400.0, 300.0], arena), [0.0, 0.0]);
    }
}
