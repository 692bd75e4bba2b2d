//! Render pipelines and their uniforms.
//!
//! - `basic`: shared helpers for layouts, uniform bind groups and pipelines
//! - `light`: the ambient plus two directional lights uniform
//! - `standard`: lit material shading for the text meshes
//! - `normal`: normal-visualizing shading for the placeholder
//! - `points`: instanced billboards for the particle field

pub mod basic;
pub mod light;
pub mod normal;
pub mod points;
pub mod standard;

/// Every pipeline the renderer batches draws into, plus the layouts flows
/// need to create compatible bind groups.
#[derive(Debug)]
pub struct Pipelines {
    pub standard: wgpu::RenderPipeline,
    pub normal: wgpu::RenderPipeline,
    pub points: wgpu::RenderPipeline,
    pub material_layout: wgpu::BindGroupLayout,
    pub points_layout: wgpu::BindGroupLayout,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        light_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let material_layout = standard::mk_material_layout(device);
        let points_layout = points::mk_points_layout(device);
        Self {
            standard: standard::mk_standard_pipeline(
                device,
                config,
                camera_bind_group_layout,
                light_bind_group_layout,
                &material_layout,
            ),
            normal: normal::mk_normal_pipeline(
                device,
                config,
                camera_bind_group_layout,
                light_bind_group_layout,
            ),
            points: points::mk_points_pipeline(
                device,
                config,
                camera_bind_group_layout,
                &points_layout,
            ),
            material_layout,
            points_layout,
        }
    }
}
