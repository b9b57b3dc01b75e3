use super::helpers;
use crate::core::AtlasLayout;
use wgpu;

/// One sampled texture holding equally sized tiles, addressed by slot.
pub(crate) struct AtlasTexture {
    pub(crate) layout: AtlasLayout,
    pub(crate) texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    label: &'static str,
}

impl AtlasTexture {
    pub(crate) fn new(device: &wgpu::Device, label: &'static str, layout: AtlasLayout) -> Self {
        let (texture, view) = helpers::create_color_texture(
            device,
            label,
            layout.width(),
            layout.height(),
            wgpu::TextureFormat::Rgba8UnormSrgb,
            wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        );
        log::info!(
            "[gpu] {} atlas {}x{} ({} slots of {}x{})",
            label,
            layout.width(),
            layout.height(),
            layout.capacity,
            layout.tile_w,
            layout.tile_h
        );
        Self {
            layout,
            texture,
            view,
            label,
        }
    }

    /// Copy one tightly packed RGBA8 tile into `slot`. Returns false when the
    /// slot or the pixel buffer does not match the layout.
    pub(crate) fn write_tile(&self, queue: &wgpu::Queue, slot: usize, rgba: &[u8]) -> bool {
        let Some((x, y)) = self.layout.origin(slot) else {
            log::debug!("[gpu] {} slot {} out of range", self.label, slot);
            return false;
        };
        let (w, h) = (self.layout.tile_w, self.layout.tile_h);
        if rgba.len() != (w * h * 4) as usize {
            log::debug!(
                "[gpu] {} tile size mismatch: {} bytes for {}x{}",
                self.label,
                rgba.len(),
                w,
                h
            );
            return false;
        }
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d {
                width: w,
                height: h,
                depth_or_array_layers: 1,
            },
        );
        true
    }

    pub(crate) fn destroy(&self) {
        self.texture.destroy();
    }
}
