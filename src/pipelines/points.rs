//! Camera-facing quads for point clouds.
//!
//! WebGL cannot size point primitives, so each point is an instance of six
//! vertices expanded in view space. The quad side is chosen so that a point
//! covers as many pixels as a `size`-pixel point at unit distance would with
//! perspective attenuation.

use cgmath::{Matrix4, Rad};
use wgpu::util::DeviceExt;

use crate::{
    config::ParticleConfig,
    data_structures::{model::Vertex, texture::Texture},
    pipelines::basic::{self, mk_pipeline_layout, mk_render_pipeline},
};

/// A point position; one per instance.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointInstance {
    pub position: [f32; 3],
}

impl Vertex for PointInstance {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointsUniform {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    /// Side length of a quad in view-space units.
    size: f32,
    _padding: [f32; 3],
}

impl PointsUniform {
    pub fn new(config: &ParticleConfig, fovy: Rad<f32>, rotation_y: f32) -> Self {
        Self {
            model: Matrix4::from_angle_y(Rad(rotation_y)).into(),
            color: config.colour.to_array(),
            size: quad_size(config.point_size, fovy),
            _padding: [0.0; 3],
        }
    }

    pub fn set_rotation_y(&mut self, rotation_y: f32) {
        self.model = Matrix4::from_angle_y(Rad(rotation_y)).into();
    }
}

/// World-space side of a quad matching an attenuated point of `point_size`.
pub fn quad_size(point_size: f32, fovy: Rad<f32>) -> f32 {
    point_size * (fovy.0 / 2.0).tan()
}

#[derive(Debug)]
pub struct PointCloud {
    pub uniform: PointsUniform,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub instance_buffer: wgpu::Buffer,
    pub amount: u32,
}

impl PointCloud {
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        points: &[PointInstance],
        uniform: PointsUniform,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Points Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = basic::mk_uniform_bind_group(device, "points_bind_group", layout, &uniform_buffer);
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Points Instance Buffer"),
            contents: bytemuck::cast_slice(points),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            uniform,
            uniform_buffer,
            bind_group,
            instance_buffer,
            amount: points.len() as u32,
        }
    }

    pub fn write(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

pub fn mk_points_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    basic::mk_uniform_layout(device, "points_bind_group_layout")
}

pub fn mk_points_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
    points_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = mk_pipeline_layout(
        device,
        "Points Pipeline Layout",
        &[camera_bind_group_layout, points_bind_group_layout],
    );
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Points Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("points.wgsl").into()),
    };
    mk_render_pipeline(
        device,
        &layout,
        config.format,
        Some(wgpu::BlendState::REPLACE),
        Some(Texture::DEPTH_FORMAT),
        None,
        &[PointInstance::desc()],
        shader,
    )
}
