use std::sync::Arc;

use anyhow::Context as _;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::{
    camera::{self, CameraResources, CameraUniform, OrbitController, Projection},
    config::{CameraConfig, Colour, LightingConfig},
    data_structures::texture,
    pipelines::{
        Pipelines,
        basic,
        light::{LightResources, LightsUniform},
    },
};

/// GPU, window and camera state shared by every flow.
#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: texture::Texture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub camera: CameraResources,
    pub projection: Projection,
    pub lights: LightResources,
    pub pipelines: Pipelines,
    pub clear_colour: wgpu::Color,
}

/// The parts of the [`Context`] a flow needs while it is being constructed.
///
/// The device is reference counted, so this is cheap to create.
#[derive(Debug, Clone)]
pub struct InitContext {
    pub device: wgpu::Device,
    pub size: (u32, u32),
    pub material_layout: wgpu::BindGroupLayout,
    pub points_layout: wgpu::BindGroupLayout,
}

impl From<&Context> for InitContext {
    fn from(ctx: &Context) -> Self {
        Self {
            device: ctx.device.clone(),
            size: (ctx.config.width, ctx.config.height),
            material_layout: ctx.pipelines.material_layout.clone(),
            points_layout: ctx.pipelines.points_layout.clone(),
        }
    }
}

impl Context {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("cannot create a surface for the window")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no compatible graphics adapter")?;
        log::info!("device and queue");
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                // WebGL doesn't support all of wgpu's features, so if
                // we're building for the web we'll have to disable some.
                // Texture sizes follow the adapter so HiDPI canvases fit.
                required_limits: if cfg!(target_arch = "wasm32") {
                    wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits())
                } else {
                    wgpu::Limits::default()
                },
                ..Default::default()
            })
            .await
            .context("cannot open the graphics device")?;

        let max_dim = device.limits().max_texture_dimension_2d;
        let (width, height) = scale_to_max((size.width.max(1), size.height.max(1)), max_dim);

        let surface_caps = surface.get_capabilities(&adapter);
        // Shaders output linear colour and rely on an sRGB surface for encoding.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("the surface supports no texture format")?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let camera_config = CameraConfig::default();
        let camera = camera::Camera::new((0.0, 0.0, camera_config.distance), (0.0, 0.0, 0.0));
        let projection = mk_projection(&camera_config, config.width, config.height);
        let controller = OrbitController::new(&camera_config, config.height);

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(&camera, &projection);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bind_group_layout = basic::mk_uniform_layout(&device, "camera_bind_group_layout");
        let camera_bind_group = basic::mk_uniform_bind_group(
            &device,
            "camera_bind_group",
            &camera_bind_group_layout,
            &camera_buffer,
        );

        let camera = CameraResources {
            camera,
            controller,
            uniform: camera_uniform,
            buffer: camera_buffer,
            bind_group: camera_bind_group,
            bind_group_layout: camera_bind_group_layout,
        };

        let depth_texture = texture::Texture::create_depth_texture(
            &device,
            [config.width, config.height],
            "depth_texture",
        );

        let lights = LightResources::new(LightsUniform::from(&LightingConfig::default()), &device);
        let pipelines = Pipelines::new(
            &device,
            &config,
            &camera.bind_group_layout,
            &lights.bind_group_layout,
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            camera,
            projection,
            lights,
            pipelines,
            window,
            depth_texture,
            clear_colour: Colour::from_hex(0x000000).to_wgpu(),
        })
    }

    /// Place the camera on +z at the configured distance from the origin and
    /// apply the configured lens and controller settings.
    pub fn configure_camera(&mut self, config: &CameraConfig) {
        self.camera.camera = camera::Camera::new((0.0, 0.0, config.distance), (0.0, 0.0, 0.0));
        self.camera.controller = OrbitController::new(config, self.config.height);
        self.projection = mk_projection(config, self.config.width, self.config.height);
        self.write_camera();
    }

    pub fn set_lighting(&mut self, config: &LightingConfig) {
        self.lights.set(&self.queue, LightsUniform::from(config));
    }

    /// Step the orbit controller and upload the resulting view.
    pub fn update_camera(&mut self) {
        self.camera.controller.update(&mut self.camera.camera);
        self.write_camera();
    }

    fn write_camera(&mut self) {
        self.camera
            .uniform
            .update_view_proj(&self.camera.camera, &self.projection);
        self.queue.write_buffer(
            &self.camera.buffer,
            0,
            bytemuck::cast_slice(&[self.camera.uniform]),
        );
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }
}

/// Scale `(w, h)` down so that neither side exceeds `max_dim`, keeping the
/// aspect ratio. Sizes that already fit are returned unchanged.
pub fn scale_to_max((w, h): (u32, u32), max_dim: u32) -> (u32, u32) {
    let max_dim = max_dim.max(1);
    if w <= max_dim && h <= max_dim {
        return (w, h);
    }
    let aspect = w as f32 / h.max(1) as f32;
    if w >= h {
        let nh = (max_dim as f32 / aspect).round().max(1.0) as u32;
        (max_dim, nh.min(max_dim))
    } else {
        let nw = (max_dim as f32 * aspect).round().max(1.0) as u32;
        (nw.min(max_dim), max_dim)
    }
}

pub fn mk_projection(config: &CameraConfig, width: u32, height: u32) -> Projection {
    Projection::new(
        width,
        height,
        cgmath::Deg(config.fovy_degrees),
        config.znear,
        config.zfar,
    )
}
