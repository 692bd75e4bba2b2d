//! The 3D banner at the top of the page.
//!
//! [`BannerScene`] holds the scene state and is usable without a GPU;
//! [`Banner`] is the flow that loads the font, mirrors the scene into GPU
//! buffers and hands the draws to the renderer.

pub mod scene;

use std::pin::Pin;

use wgpu::util::DeviceExt;

use crate::{
    config::SceneConfig,
    context::{Context, InitContext},
    data_structures::{
        instance::{Instance, InstanceRaw},
        model::Mesh,
    },
    error::Error,
    flow::{EventFuture, FlowConstructor, GraphicsFlow, Out},
    loading::{LoaderView, LoadingManager},
    pipelines::{
        points::{PointCloud, PointInstance, PointsUniform},
        standard::Material,
    },
    render::{Instanced, Lit, Points, Render},
    resources::{
        font::{Typeface, load_typeface},
        particles::ParticleField,
    },
    schedule::{Animate, FrameInput},
};

pub use scene::BannerScene;

/// Events the banner sends to itself through the event loop.
#[derive(Debug)]
pub enum BannerEvent {
    /// The typeface request for `url` finished.
    FontLoaded {
        url: String,
        result: Result<Typeface, Error>,
    },
}

/// Fetch the typeface at `url` and report the outcome as a [`BannerEvent`].
pub fn font_request(url: String) -> EventFuture<BannerEvent> {
    Box::pin(async move {
        let result = load_typeface(&url).await;
        BannerEvent::FontLoaded { url, result }
    })
}

/// A mesh with the instance buffer that places it.
#[derive(Debug)]
struct GpuNode {
    mesh: Mesh,
    instance_buffer: wgpu::Buffer,
}

impl GpuNode {
    fn new(device: &wgpu::Device, mesh: Mesh, instance: &Instance) -> Self {
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Instance Buffer", mesh.name)),
            contents: bytemuck::cast_slice(&[instance.to_raw()]),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        Self {
            mesh,
            instance_buffer,
        }
    }

    fn write(&self, queue: &wgpu::Queue, instance: &Instance) {
        let raw: [InstanceRaw; 1] = [instance.to_raw()];
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&raw));
    }

    fn instanced(&self) -> Instanced<'_> {
        Instanced {
            instance: &self.instance_buffer,
            mesh: &self.mesh,
            amount: 1,
        }
    }
}

pub struct Banner {
    scene: BannerScene,
    loader: LoadingManager<Box<dyn LoaderView>>,
    placeholder: Option<GpuNode>,
    text: Vec<GpuNode>,
    material: Material,
    cloud: PointCloud,
}

impl Banner {
    pub fn new(init: &InitContext, scene: BannerScene, view: Box<dyn LoaderView>) -> Self {
        let config = scene.config();
        let placeholder = scene.placeholder().map(|node| {
            let mesh = Mesh::from_geometry(&init.device, &node.name, &node.geometry);
            GpuNode::new(&init.device, mesh, &node.local)
        });
        let material = Material::new(&init.device, &init.material_layout, &config.material);

        let points: Vec<PointInstance> = scene
            .particles()
            .points()
            .map(|position| PointInstance { position })
            .collect();
        let uniform = PointsUniform::new(
            &config.particles,
            scene.projection().fovy(),
            scene.particles().rotation_y(),
        );
        let cloud = PointCloud::new(&init.device, &init.points_layout, &points, uniform);

        let loader = LoadingManager::new(config.loader.clone(), view);
        Self {
            scene,
            loader,
            placeholder,
            text: Vec::new(),
            material,
            cloud,
        }
    }

    pub fn scene(&self) -> &BannerScene {
        &self.scene
    }

    pub fn loader(&self) -> &LoadingManager<Box<dyn LoaderView>> {
        &self.loader
    }

    /// Apply the font request's outcome and upload the text meshes once
    /// they exist.
    pub fn on_font_loaded(&mut self, ctx: &Context, url: &str, result: Result<Typeface, Error>) {
        self.scene.on_font_loaded(url, result, &mut self.loader);

        if self.scene.placeholder().is_none() {
            self.placeholder = None;
        }
        let Some(group) = self.scene.text_group() else {
            return;
        };
        if !self.text.is_empty() {
            return;
        }
        let transforms = group.world_transforms(&Instance::new());
        self.text = group
            .children()
            .iter()
            .zip(transforms.iter())
            .map(|(child, world)| {
                let mesh = Mesh::from_geometry(&ctx.device, &child.name, &child.geometry);
                GpuNode::new(&ctx.device, mesh, world)
            })
            .collect();
        log::info!("text installed with {} meshes", self.text.len());
    }

    fn write_buffers(&mut self, queue: &wgpu::Queue) {
        if let (Some(gpu), Some(node)) = (&self.placeholder, self.scene.placeholder()) {
            gpu.write(queue, &node.local);
        }
        if let Some(group) = self.scene.text_group() {
            let transforms = group.world_transforms(&Instance::new());
            for (gpu, world) in self.text.iter().zip(transforms.iter()) {
                gpu.write(queue, world);
            }
        }
        self.cloud
            .uniform
            .set_rotation_y(self.scene.particles().rotation_y());
        self.cloud.write(queue);
    }
}

impl GraphicsFlow<BannerEvent> for Banner {
    fn on_init(&mut self, ctx: &mut Context) -> Out<BannerEvent> {
        // The surface has its real size by now; the flow may have been built
        // before the canvas was laid out.
        let projection = self.scene.attach(ctx.size());
        let config = self.scene.config();
        ctx.clear_colour = config.background.to_wgpu();
        ctx.configure_camera(&config.camera);
        ctx.projection = projection;
        ctx.set_lighting(&config.lighting);

        let url = config.loader.font_url.clone();
        self.loader.item_start(&url);
        Out::FutEvent(vec![font_request(url)])
    }

    fn on_update(&mut self, ctx: &Context, frame: &FrameInput) -> Out<BannerEvent> {
        self.scene.advance(frame);
        self.write_buffers(&ctx.queue);
        Out::Empty
    }

    fn on_window_events(&mut self, _: &Context, event: &winit::event::WindowEvent) -> Out<BannerEvent> {
        let winit::event::WindowEvent::Resized(size) = event else {
            return Out::Empty;
        };
        if !self.scene.resize(size.width, size.height) {
            return Out::Empty;
        }
        let projection = self.scene.projection().clone();
        Out::Configure(Box::new(move |ctx| ctx.projection = projection))
    }

    fn on_custom_events(&mut self, ctx: &Context, event: BannerEvent) -> Option<BannerEvent> {
        match event {
            BannerEvent::FontLoaded { url, result } => {
                self.on_font_loaded(ctx, &url, result);
                None
            }
        }
    }

    fn on_render(&self) -> Render<'_> {
        let mut renders = Vec::with_capacity(self.text.len() + 2);
        if let Some(placeholder) = &self.placeholder {
            renders.push(Render::Normal(placeholder.instanced()));
        }
        renders.extend(self.text.iter().map(|node| {
            Render::Standard(Lit {
                instanced: node.instanced(),
                material: &self.material.bind_group,
            })
        }));
        renders.push(Render::Points(Points { cloud: &self.cloud }));
        renders.into()
    }
}

/// A [`FlowConstructor`] for the banner.
///
/// `config` is validated here so that a bad configuration fails before the
/// window opens.
pub fn constructor(
    config: SceneConfig,
    view: Box<dyn LoaderView>,
) -> Result<FlowConstructor<BannerEvent>, Error> {
    let config = config.validate()?;
    Ok(Box::new(move |init: InitContext| {
        let flow: Pin<Box<dyn Future<Output = Box<dyn GraphicsFlow<BannerEvent>>>>> =
            Box::pin(async move {
                let (width, height) = init.size;
                let particles = ParticleField::new(&config.particles);
                let scene = BannerScene::with_particles(config, width, height, particles);
                Box::new(Banner::new(&init, scene, view)) as Box<dyn GraphicsFlow<BannerEvent>>
            });
        flow
    }))
}
