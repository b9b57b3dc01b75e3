use super::helpers;
use wgpu;

pub(crate) const SCENE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Offscreen scene color the tiles are blended into before the vignette
/// composite. Recreated on resize.
pub(crate) struct RenderTargets {
    pub(crate) scene_tex: wgpu::Texture,
    pub(crate) scene_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (scene_tex, scene_view) = Self::create(device, width, height);
        Self {
            scene_tex,
            scene_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.scene_tex.destroy();
        (self.scene_tex, self.scene_view) = Self::create(device, width, height);
    }

    pub(crate) fn destroy(&self) {
        self.scene_tex.destroy();
    }

    fn create(device: &wgpu::Device, width: u32, height: u32) -> (wgpu::Texture, wgpu::TextureView) {
        helpers::create_color_texture(
            device,
            "scene_tex",
            width,
            height,
            SCENE_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        )
    }
}
