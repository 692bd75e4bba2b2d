use crate::{
    data_structures::{
        instance::InstanceRaw,
        model::{ModelVertex, Vertex},
        texture::Texture,
    },
    pipelines::basic::{mk_pipeline_layout, mk_render_pipeline},
};

/// Colours surfaces by their view-space normal. Shares the camera and light
/// bind group slots with the standard pipeline so both draw through
/// `DrawModel`.
pub fn mk_normal_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
    light_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = mk_pipeline_layout(
        device,
        "Normal Pipeline Layout",
        &[camera_bind_group_layout, light_bind_group_layout],
    );
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Normal Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("normal.wgsl").into()),
    };
    mk_render_pipeline(
        device,
        &layout,
        config.format,
        Some(wgpu::BlendState::REPLACE),
        Some(Texture::DEPTH_FORMAT),
        Some(wgpu::Face::Back),
        &[ModelVertex::desc(), InstanceRaw::desc()],
        shader,
    )
}
