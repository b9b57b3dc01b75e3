use crate::constants::CLEAR_RGBA;
use crate::core::constants::{
    ATLAS_MAX_DIM, CAPTION_TILE_H_PX, CAPTION_TILE_W_PX, IMAGE_TILE_PX,
};
use crate::core::AtlasLayout;
use web_sys as web;

mod atlas;
mod helpers;
mod post;
mod targets;
mod tiles;

use atlas::AtlasTexture;
use targets::RenderTargets;

pub use tiles::{pack_instances, SceneUniforms, TileInstance};

/// Which atlas a decoded tile belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AtlasKind {
    Image,
    Caption,
}

// ===================== WebGPU state =====================

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    images: AtlasTexture,
    captions: AtlasTexture,
    tiles: tiles::TileResources,
    post: post::PostResources,
    bg_scene: wgpu::BindGroup,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    /// Acquire adapter, device and surface for `canvas` and allocate atlases
    /// with one slot per catalog image.
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        image_count: usize,
        particle_count: usize,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} format={:?}", width, height, format);

        let max_dim = device.limits().max_texture_dimension_2d.min(ATLAS_MAX_DIM);
        let images = AtlasTexture::new(
            &device,
            "image_atlas",
            AtlasLayout::new(image_count, IMAGE_TILE_PX, IMAGE_TILE_PX, max_dim),
        );
        let captions = AtlasTexture::new(
            &device,
            "caption_atlas",
            AtlasLayout::new(image_count, CAPTION_TILE_W_PX, CAPTION_TILE_H_PX, max_dim),
        );

        let targets = RenderTargets::new(&device, width, height);
        let linear_sampler = helpers::linear_clamp_sampler(&device, "linear_sampler");
        let tiles = tiles::TileResources::new(
            &device,
            targets::SCENE_FORMAT,
            &images,
            &captions,
            &linear_sampler,
            particle_count * 3,
        );

        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::POST_WGSL.into()),
        });
        let post = post::create_post_resources(&device, &post_shader, format);
        let bg_scene =
            post::scene_bind_group(&device, &post, &linear_sampler, &targets.scene_view);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            linear_sampler,
            images,
            captions,
            tiles,
            post,
            bg_scene,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_RGBA[0],
                g: CLEAR_RGBA[1],
                b: CLEAR_RGBA[2],
                a: CLEAR_RGBA[3],
            },
        })
    }

    pub fn atlas_layout(&self, kind: AtlasKind) -> AtlasLayout {
        match kind {
            AtlasKind::Image => self.images.layout,
            AtlasKind::Caption => self.captions.layout,
        }
    }

    pub fn upload_tile(&self, kind: AtlasKind, slot: usize, rgba: &[u8]) -> bool {
        let atlas = match kind {
            AtlasKind::Image => &self.images,
            AtlasKind::Caption => &self.captions,
        };
        atlas.write_tile(&self.queue, slot, rgba)
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
            self.targets.recreate(&self.device, width, height);
            self.bg_scene = post::scene_bind_group(
                &self.device,
                &self.post,
                &self.linear_sampler,
                &self.targets.scene_view,
            );
        }
    }

    /// Re-apply the surface configuration, e.g. after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(
        &mut self,
        uniforms: &SceneUniforms,
        instances: &[TileInstance],
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.tiles
            .write(&self.device, &self.queue, uniforms, instances);
        self.queue.write_buffer(
            &self.post.uniform_buffer,
            0,
            bytemuck::bytes_of(&post::PostUniforms::vignette(self.width, self.height)),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.scene_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.tiles.draw(&mut rpass, instances.len());
        }

        // Composite to swapchain with the vignette
        post::blit(
            &mut encoder,
            "composite",
            &view,
            self.clear_color,
            &self.post.composite_pipeline,
            &self.bg_scene,
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Free GPU-resident resources ahead of dropping the state.
    pub fn release(&self) {
        self.images.destroy();
        self.captions.destroy();
        self.tiles.destroy();
        self.targets.destroy();
        self.post.uniform_buffer.destroy();
        log::info!("[gpu] resources released");
    }
}
