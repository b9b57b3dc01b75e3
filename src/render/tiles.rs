use super::atlas::AtlasTexture;
use super::helpers;
use crate::core::field::{ParticleField, TileTexture};
use crate::core::{AtlasLayout, UvRect};
use glam::Mat4;
use wgpu;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) model: [[f32; 4]; 4],
}

impl SceneUniforms {
    pub(crate) fn new(view_proj: Mat4, model: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TileInstance {
    origin_scale: [f32; 4],
    rotation: [f32; 4],
    offset: [f32; 4],
    extent: [f32; 4],
    uv_rect: [f32; 4],
    color: [f32; 4],
}

const MODE_FLAT: f32 = 0.0;
const MODE_IMAGE: f32 = 1.0;
const MODE_CAPTION: f32 = 2.0;

// Opacities below this are not worth a draw.
const MIN_VISIBLE_ALPHA: f32 = 1.0 / 512.0;

const INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
    0 => Float32x4,
    1 => Float32x4,
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
];

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn uv_array(rect: Option<UvRect>) -> [f32; 4] {
    let r = rect.unwrap_or(UvRect::FULL);
    [r.offset.x, r.offset.y, r.repeat.x, r.repeat.y]
}

/// Fill `out` with instances in the given back-to-front particle order.
/// Within a particle the quads keep their fixed layering.
pub fn pack_instances(
    field: &ParticleField,
    order: &[usize],
    images: &AtlasLayout,
    captions: &AtlasLayout,
    out: &mut Vec<TileInstance>,
) {
    out.clear();
    for &i in order {
        let Some(p) = field.particle(i) else {
            continue;
        };
        let origin_scale = [p.position.x, p.position.y, p.position.z, p.scale.current];
        let rotation = p.orientation.to_array();
        for e in &p.elements {
            let look = p.appearance(e.kind);
            let opacity = look.opacity.clamp(0.0, 1.0);
            if opacity < MIN_VISIBLE_ALPHA {
                continue;
            }
            let (mode, uv) = match look.texture {
                TileTexture::Flat => (MODE_FLAT, uv_array(None)),
                TileTexture::Image { slot } => match images.uv_rect(slot) {
                    Some(r) => (MODE_IMAGE, uv_array(Some(r))),
                    None => (MODE_FLAT, uv_array(None)),
                },
                TileTexture::Caption { slot } => match captions.uv_rect(slot) {
                    Some(r) => (MODE_CAPTION, uv_array(Some(r))),
                    None => continue,
                },
            };
            out.push(TileInstance {
                origin_scale,
                rotation,
                offset: [e.offset.x, e.offset.y, e.offset.z, 0.0],
                extent: [e.half_extent.x, e.half_extent.y, mode, 0.0],
                uv_rect: uv,
                color: [
                    srgb_to_linear(look.color[0]),
                    srgb_to_linear(look.color[1]),
                    srgb_to_linear(look.color[2]),
                    opacity,
                ],
            });
        }
    }
}

pub(crate) struct TileResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) instance_buffer: wgpu::Buffer,
    pub(crate) instance_capacity: usize,
}

impl TileResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        target_format: wgpu::TextureFormat,
        images: &AtlasTexture,
        captions: &AtlasTexture,
        sampler: &wgpu::Sampler,
        initial_instances: usize,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sphere_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SPHERE_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tiles_bgl"),
            entries: &[
                helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX),
                helpers::texture_entry(1),
                helpers::texture_entry(2),
                helpers::sampler_entry(3),
            ],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tiles_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tiles_pipeline"),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_tile"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<TileInstance>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &INSTANCE_ATTRIBUTES,
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            // Tiles are visible from both sides.
            primitive: wgpu::PrimitiveState {
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_tile"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tiles_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let instance_capacity = initial_instances.max(1);
        let instance_buffer = create_instance_buffer(device, instance_capacity);
        let bind_group =
            create_bind_group(device, &bgl, &uniform_buffer, images, captions, sampler);

        Self {
            pipeline,
            bind_group,
            uniform_buffer,
            instance_buffer,
            instance_capacity,
        }
    }

    /// Upload this frame's instances, growing the buffer when needed.
    pub(crate) fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        uniforms: &SceneUniforms,
        instances: &[TileInstance],
    ) {
        if instances.len() > self.instance_capacity {
            self.instance_buffer.destroy();
            self.instance_capacity = instances.len().next_power_of_two();
            self.instance_buffer = create_instance_buffer(device, self.instance_capacity);
        }
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(instances));
        }
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, count: usize) {
        if count == 0 {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        rpass.draw(0..6, 0..count as u32);
    }

    pub(crate) fn destroy(&self) {
        self.uniform_buffer.destroy();
        self.instance_buffer.destroy();
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("tile_instances"),
        size: (capacity * std::mem::size_of::<TileInstance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_bind_group(
    device: &wgpu::Device,
    bgl: &wgpu::BindGroupLayout,
    uniform_buffer: &wgpu::Buffer,
    images: &AtlasTexture,
    captions: &AtlasTexture,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("tiles_bg"),
        layout: bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&images.view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::TextureView(&captions.view),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
