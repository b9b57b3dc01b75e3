use super::helpers;
use crate::constants::{VIGNETTE_INNER, VIGNETTE_MID, VIGNETTE_MID_ALPHA, VIGNETTE_OUTER_ALPHA};
use wgpu;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    resolution: [f32; 2],
    inner: f32,
    mid: f32,
    mid_alpha: f32,
    outer_alpha: f32,
    _pad: [f32; 2],
}

impl PostUniforms {
    pub(crate) fn vignette(width: u32, height: u32) -> Self {
        Self {
            resolution: [width as f32, height as f32],
            inner: VIGNETTE_INNER,
            mid: VIGNETTE_MID,
            mid_alpha: VIGNETTE_MID_ALPHA,
            outer_alpha: VIGNETTE_OUTER_ALPHA,
            _pad: [0.0; 2],
        }
    }
}

pub(crate) struct PostResources {
    pub(crate) bgl: wgpu::BindGroupLayout, // tex+sampler+uniform
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) composite_pipeline: wgpu::RenderPipeline,
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    post_shader: &wgpu::ShaderModule,
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl"),
        entries: &[
            helpers::texture_entry(0),
            helpers::sampler_entry(1),
            helpers::uniform_entry(2, wgpu::ShaderStages::FRAGMENT),
        ],
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("post_uniforms"),
        size: std::mem::size_of::<PostUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_comp"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let composite_pipeline = helpers::make_post_pipeline(
        device,
        &layout,
        post_shader,
        "fs_composite",
        swap_format,
        Some(wgpu::BlendState::REPLACE),
    );

    PostResources {
        bgl,
        uniform_buffer,
        composite_pipeline,
    }
}

pub(crate) fn scene_bind_group(
    device: &wgpu::Device,
    post: &PostResources,
    sampler: &wgpu::Sampler,
    scene_view: &wgpu::TextureView,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("bg_scene"),
        layout: &post.bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(scene_view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: post.uniform_buffer.as_entire_binding(),
            },
        ],
    })
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    clear: wgpu::Color,
    pipeline: &wgpu::RenderPipeline,
    bind_group: &wgpu::BindGroup,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bind_group, &[]);
    r.draw(0..3, 0..1);
}
