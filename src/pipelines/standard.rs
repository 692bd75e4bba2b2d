//! Lit, physically-influenced surface shading used for the text.

use wgpu::util::DeviceExt;

use crate::{
    config::MaterialConfig,
    data_structures::{
        instance::InstanceRaw,
        model::{ModelVertex, Vertex},
        texture::Texture,
    },
    pipelines::basic::{self, mk_pipeline_layout, mk_render_pipeline},
};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    color: [f32; 4],
    metalness: f32,
    roughness: f32,
    _padding: [f32; 2],
}

impl From<&MaterialConfig> for MaterialUniform {
    fn from(material: &MaterialConfig) -> Self {
        Self {
            color: material.colour.to_array(),
            metalness: material.metalness,
            roughness: material.roughness,
            _padding: [0.0; 2],
        }
    }
}

/// A material shared by every mesh that binds it.
#[derive(Debug)]
pub struct Material {
    pub uniform: MaterialUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl Material {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, config: &MaterialConfig) -> Self {
        let uniform = MaterialUniform::from(config);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Material Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = basic::mk_uniform_bind_group(device, "material_bind_group", layout, &buffer);
        Self {
            uniform,
            buffer,
            bind_group,
        }
    }
}

pub fn mk_material_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    basic::mk_uniform_layout(device, "material_bind_group_layout")
}

pub fn mk_standard_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
    light_bind_group_layout: &wgpu::BindGroupLayout,
    material_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = mk_pipeline_layout(
        device,
        "Standard Pipeline Layout",
        &[
            camera_bind_group_layout,
            light_bind_group_layout,
            material_bind_group_layout,
        ],
    );
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Standard Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("standard.wgsl").into()),
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
