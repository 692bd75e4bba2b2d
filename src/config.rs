//! Typed configuration for the banner scene.
//!
//! Every tunable of the scene lives in one of the records below instead of
//! loose parameter bags. [`SceneConfig::default`] reproduces the page as it
//! ships; [`SceneConfig::validate`] rejects values the geometry or GPU code
//! cannot work with.

use crate::error::Error;

/// Linear RGB colour.
///
/// Hex colours are authored in sRGB and converted on construction because
/// the surface format is sRGB and shaders work in linear space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Colour {
    pub const WHITE: Colour = Colour {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    pub fn scaled(&self, intensity: f32) -> [f32; 4] {
        [self.r * intensity, self.g * intensity, self.b * intensity, 1.0]
    }

    pub fn to_array(&self) -> [f32; 4] {
        self.scaled(1.0)
    }

    pub fn to_wgpu(&self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: 1.0,
        }
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Distance of the camera from the orbit target along +z.
    pub distance: f32,
    pub damping_factor: f32,
    pub enable_zoom: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fovy_degrees: 100.0,
            znear: 0.1,
            zfar: 1000.0,
            distance: 5.0,
            damping_factor: 0.05,
            enable_zoom: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLightConfig {
    pub colour: Colour,
    pub intensity: f32,
    /// Position of the light; it shines towards the origin.
    pub position: [f32; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightingConfig {
    pub ambient: Colour,
    pub ambient_intensity: f32,
    pub key: DirectionalLightConfig,
    pub fill: DirectionalLightConfig,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient: Colour::WHITE,
            ambient_intensity: 0.5,
            key: DirectionalLightConfig {
                colour: Colour::WHITE,
                intensity: 1.0,
                position: [5.0, 5.0, 5.0],
            },
            fill: DirectionalLightConfig {
                colour: Colour::from_hex(0x3498db),
                intensity: 0.8,
                position: [-5.0, 3.0, -5.0],
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BevelStyle {
    pub thickness: f32,
    pub size: f32,
    pub offset: f32,
    pub segments: u32,
}

/// Typographic parameters of one extruded text line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    /// Extrusion depth along +z.
    pub depth: f32,
    pub curve_segments: u32,
    /// `None` extrudes straight walls without chamfer.
    pub bevel: Option<BevelStyle>,
}

impl TextStyle {
    pub fn headline() -> Self {
        Self {
            size: 0.5,
            depth: 0.2,
            curve_segments: 5,
            bevel: Some(BevelStyle {
                thickness: 0.03,
                size: 0.02,
                offset: 0.0,
                segments: 4,
            }),
        }
    }

    pub fn subtitle() -> Self {
        Self {
            size: 0.15,
            depth: 0.05,
            curve_segments: 4,
            bevel: Some(BevelStyle {
                thickness: 0.01,
                size: 0.01,
                offset: 0.0,
                segments: 3,
            }),
        }
    }

    fn validate(&self, which: &str) -> Result<(), Error> {
        if !(self.size > 0.0) {
            return Err(Error::InvalidConfig(format!("{which}: size must be positive")));
        }
        if self.depth < 0.0 {
            return Err(Error::InvalidConfig(format!("{which}: depth must not be negative")));
        }
        if self.curve_segments == 0 {
            return Err(Error::InvalidConfig(format!(
                "{which}: at least one curve segment is required"
            )));
        }
        if let Some(bevel) = self.bevel {
            if bevel.segments == 0 || bevel.thickness < 0.0 || bevel.size < 0.0 {
                return Err(Error::InvalidConfig(format!("{which}: invalid bevel {bevel:?}")));
            }
        }
        Ok(())
    }
}

/// Parameters of the physically-influenced text material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialConfig {
    pub colour: Colour,
    pub metalness: f32,
    pub roughness: f32,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            colour: Colour::WHITE,
            metalness: 0.3,
            roughness: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleConfig {
    pub count: usize,
    /// Points are spread uniformly in `[-half_extent, half_extent]` on each axis.
    pub half_extent: f32,
    pub point_size: f32,
    pub colour: Colour,
    /// Rotation about the vertical axis added every frame, in radians.
    pub spin_per_frame: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 2000,
            half_extent: 10.0,
            point_size: 0.02,
            colour: Colour::from_hex(0x3498db),
            spin_per_frame: 0.0005,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    pub font_url: String,
    pub error_message: String,
    /// Delay between fading the overlay and removing it from layout.
    pub hide_delay_millis: u32,
}

impl LoaderConfig {
    pub fn progress_message(&self, percent: u32) -> String {
        format!("Loading 3D Scene... {}%", percent)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            font_url: "https://threejs.org/examples/fonts/helvetiker_bold.typeface.json".into(),
            error_message: "Error loading 3D assets".into(),
            hide_delay_millis: 500,
        }
    }
}

/// Everything the banner scene needs, validated once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub background: Colour,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub headline: String,
    pub subtitle: String,
    pub headline_style: TextStyle,
    pub subtitle_style: TextStyle,
    /// Vertical distance between the headline and the subtitle below it.
    pub subtitle_offset: f32,
    pub material: MaterialConfig,
    pub particles: ParticleConfig,
    pub loader: LoaderConfig,
    /// Rotation added to the text group every frame, in radians.
    pub text_spin_per_frame: f32,
    /// Amplitude of the vertical idle motion of the text group.
    pub float_amplitude: f32,
    /// Rotation added to the placeholder cube on x and y every frame.
    pub placeholder_spin_per_frame: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: Colour::from_hex(0x050505),
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
            headline: "Anirudh Vasudev".into(),
            subtitle: "CREATIVE DEVELOPER".into(),
            headline_style: TextStyle::headline(),
            subtitle_style: TextStyle::subtitle(),
            subtitle_offset: 0.4,
            material: MaterialConfig::default(),
            particles: ParticleConfig::default(),
            loader: LoaderConfig::default(),
            text_spin_per_frame: 0.005,
            float_amplitude: 0.1,
            placeholder_spin_per_frame: 0.01,
        }
    }
}

impl SceneConfig {
    /// Uses the profile of a resume document for the banner text.
    pub fn with_profile(mut self, name: &str, title: &str) -> Self {
        self.headline = name.to_string();
        self.subtitle = title.to_uppercase();
        self
    }

    /// Uses `headline` and `subtitle` verbatim for the banner text.
    pub fn with_banner(mut self, headline: &str, subtitle: &str) -> Self {
        self.headline = headline.to_string();
        self.subtitle = subtitle.to_string();
        self
    }

    pub fn validate(self) -> Result<Self, Error> {
        let camera = &self.camera;
        if !(camera.fovy_degrees > 0.0 && camera.fovy_degrees < 180.0) {
            return Err(Error::InvalidConfig(format!(
                "field of view {} is outside (0, 180)",
                camera.fovy_degrees
            )));
        }
        if !(camera.znear > 0.0 && camera.zfar > camera.znear) {
            return Err(Error::InvalidConfig("clip planes must satisfy 0 < near < far".into()));
        }
        if !(0.0..=1.0).contains(&camera.damping_factor) {
            return Err(Error::InvalidConfig("damping factor must be within [0, 1]".into()));
        }
        self.headline_style.validate("headline")?;
        self.subtitle_style.validate("subtitle")?;
        let material = &self.material;
        if !(0.0..=1.0).contains(&material.metalness) || !(0.0..=1.0).contains(&material.roughness)
        {
            return Err(Error::InvalidConfig(
                "metalness and roughness must be within [0, 1]".into(),
            ));
        }
        if self.particles.count == 0 || self.particles.half_extent <= 0.0 {
            return Err(Error::InvalidConfig("particle field must not be empty".into()));
        }
        if self.loader.font_url.is_empty() {
            return Err(Error::InvalidConfig("font url is empty".into()));
        }
        Ok(self)
    }
}
