use cgmath::{InnerSpace, Vector3};
use wgpu::util::DeviceExt;

use crate::{config::LightingConfig, pipelines::basic};

#[derive(Debug)]
pub struct LightResources {
    pub uniform: LightsUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

/// One ambient term and two directional lights.
///
/// Directions point from the surface towards the light; colours are
/// premultiplied by intensity. Every field is a vec4 to satisfy uniform
/// alignment.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub ambient: [f32; 4],
    pub key_direction: [f32; 4],
    pub key_color: [f32; 4],
    pub fill_direction: [f32; 4],
    pub fill_color: [f32; 4],
}

fn direction(position: [f32; 3]) -> [f32; 4] {
    let v = Vector3::from(position);
    let v = if v.magnitude2() > 0.0 { v.normalize() } else { Vector3::unit_y() };
    v.extend(0.0).into()
}

impl From<&LightingConfig> for LightsUniform {
    fn from(config: &LightingConfig) -> Self {
        Self {
            ambient: config.ambient.scaled(config.ambient_intensity),
            key_direction: direction(config.key.position),
            key_color: config.key.colour.scaled(config.key.intensity),
            fill_direction: direction(config.fill.position),
            fill_color: config.fill.colour.scaled(config.fill.intensity),
        }
    }
}

impl LightResources {
    pub fn new(uniform: LightsUniform, device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lights Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group_layout = basic::mk_uniform_layout(device, "lights_bind_group_layout");
        let bind_group =
            basic::mk_uniform_bind_group(device, "lights_bind_group", &bind_group_layout, &buffer);
        Self {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    pub fn set(&mut self, queue: &wgpu::Queue, uniform: LightsUniform) {
        self.uniform = uniform;
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}
