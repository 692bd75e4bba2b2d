//! CPU-side state of the banner.
//!
//! Everything that changes over the lifetime of the page lives here: the
//! placeholder cube, the text group, the particle field and the projection.
//! The GPU side only mirrors this state into buffers once per frame.

use cgmath::Vector3;

use crate::{
    camera::Projection,
    config::SceneConfig,
    context::mk_projection,
    data_structures::{
        model::MeshData,
        scene_graph::{GroupNode, MeshNode},
    },
    error::Error,
    loading::{LoaderView, LoadingManager},
    resources::{font::Typeface, particles::ParticleField, primitives, text::TextGeometry},
    schedule::{Animate, FrameInput},
};

pub const PLACEHOLDER: &str = "placeholder";
pub const TEXT_GROUP: &str = "text";
pub const HEADLINE: &str = "name";
pub const SUBTITLE: &str = "subtitle";

/// The banner scene without any GPU resources.
#[derive(Debug, Clone)]
pub struct BannerScene {
    config: SceneConfig,
    placeholder: Option<MeshNode<MeshData>>,
    /// Accumulated x/y rotation of the placeholder.
    placeholder_angles: (f32, f32),
    text: Option<GroupNode<TextGeometry>>,
    text_angle: f32,
    particles: ParticleField,
    projection: Projection,
    viewport: (u32, u32),
}

impl BannerScene {
    pub fn new(config: SceneConfig, width: u32, height: u32) -> Result<Self, Error> {
        let config = config.validate()?;
        let particles = ParticleField::new(&config.particles);
        Ok(Self::with_particles(config, width, height, particles))
    }

    /// Build the scene around an existing particle field. `config` must be valid.
    pub(crate) fn with_particles(
        config: SceneConfig,
        width: u32,
        height: u32,
        particles: ParticleField,
    ) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            placeholder: Some(MeshNode::new(PLACEHOLDER, primitives::cuboid(1.0, 1.0, 1.0))),
            placeholder_angles: (0.0, 0.0),
            text: None,
            text_angle: 0.0,
            projection: mk_projection(&config.camera, width, height),
            viewport: (width, height),
            particles,
            config,
        }
    }

    /// Like [`BannerScene::new`] with a seeded particle field.
    pub fn with_rng<R: rand::Rng + ?Sized>(
        config: SceneConfig,
        width: u32,
        height: u32,
        rng: &mut R,
    ) -> Result<Self, Error> {
        let config = config.validate()?;
        let particles = ParticleField::with_rng(&config.particles, rng);
        Ok(Self::with_particles(config, width, height, particles))
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn placeholder(&self) -> Option<&MeshNode<MeshData>> {
        self.placeholder.as_ref()
    }

    pub fn text_group(&self) -> Option<&GroupNode<TextGeometry>> {
        self.text.as_ref()
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Match the projection and viewport to a new output size.
    ///
    /// Returns `false` and changes nothing for a zero-sized output.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.projection.resize(width, height);
        self.viewport = (width, height);
        true
    }

    /// Fit the scene to the output it is attached to and return the
    /// projection the context should use.
    ///
    /// Web canvases report no size until their first layout, so the scene may
    /// have been built for a 1x1 output.
    pub fn attach(&mut self, (width, height): (u32, u32)) -> Projection {
        if !self.resize(width, height) {
            log::debug!("attached to a zero-sized output, keeping {:?}", self.viewport);
        }
        self.projection.clone()
    }

    /// Build both text lines and swap the placeholder for them.
    ///
    /// Geometry is built before anything is touched, so on error the scene
    /// still shows the placeholder.
    pub fn install_text(&mut self, typeface: &Typeface) -> Result<(), Error> {
        if self.text.is_some() {
            log::warn!("text is already installed");
            return Ok(());
        }

        let mut headline = TextGeometry::new(
            typeface,
            &self.config.headline,
            &self.config.headline_style,
        )?;
        headline.center();
        let mut subtitle = TextGeometry::new(
            typeface,
            &self.config.subtitle,
            &self.config.subtitle_style,
        )?;
        subtitle.center();

        let headline = MeshNode::new(HEADLINE, headline);
        let mut subtitle = MeshNode::new(SUBTITLE, subtitle);
        subtitle.local =
            Vector3::new(0.0, headline.local.position.y - self.config.subtitle_offset, 0.0).into();

        let mut group = GroupNode::new(TEXT_GROUP);
        group.add_child(headline);
        group.add_child(subtitle);

        self.text = Some(group);
        if self.placeholder.take().is_some() {
            log::debug!("placeholder replaced by text");
        }
        Ok(())
    }

    /// Apply the outcome of the font request for `url` and report it to `loader`.
    pub fn on_font_loaded<V: LoaderView>(
        &mut self,
        url: &str,
        result: Result<Typeface, Error>,
        loader: &mut LoadingManager<V>,
    ) {
        match result.and_then(|typeface| self.install_text(&typeface)) {
            Ok(()) => loader.item_end(url),
            Err(e) => loader.item_error(url, &e),
        }
    }
}

impl Animate for BannerScene {
    fn advance(&mut self, frame: &FrameInput) {
        if let Some(text) = &mut self.text {
            self.text_angle += self.config.text_spin_per_frame;
            text.local.set_euler(0.0, self.text_angle, 0.0);
            text.local.position.y = frame.seconds().sin() * self.config.float_amplitude;
        }
        if let Some(placeholder) = &mut self.placeholder {
            let spin = self.config.placeholder_spin_per_frame;
            self.placeholder_angles.0 += spin;
            self.placeholder_angles.1 += spin;
            let (x, y) = self.placeholder_angles;
            placeholder.local.set_euler(x, y, 0.0);
        }
        self.particles.spin(self.config.particles.spin_per_frame);
    }
}
