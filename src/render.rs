//! Render composition and pipeline batching.
//!
//! Flows describe what they want drawn with a [`Render`]; the engine sorts
//! the parts into one batch per pipeline so that every pipeline is bound
//! once per frame.
//!
//! # Key types
//!
//! - [`Render<'a>`] is the enum flows return from `on_render`
//! - [`Instanced<'a>`] is a mesh with its instance buffer
//! - [`Lit<'a>`] is an instanced mesh with a standard material
//! - [`Points<'a>`] is a point cloud

use crate::{
    data_structures::model::Mesh,
    pipelines::points::PointCloud,
};

/// A mesh drawn `amount` times with transforms from `instance`.
pub struct Instanced<'a> {
    pub instance: &'a wgpu::Buffer,
    pub mesh: &'a Mesh,
    pub amount: usize,
}

/// An instanced mesh shaded with the material in `material`.
pub struct Lit<'a> {
    pub instanced: Instanced<'a>,
    pub material: &'a wgpu::BindGroup,
}

pub struct Points<'a> {
    pub cloud: &'a PointCloud,
}

/// Specifies how a flow should be rendered.
///
/// # Variants
///
/// - `Standard(Lit)` renders a lit mesh with a standard material
/// - `Normal(Instanced)` renders a mesh coloured by its normals
/// - `Points(Points)` renders camera-facing point quads
/// - `Composed(Vec<Render>)` recursively renders a composition of renders
pub enum Render<'a> {
    Standard(Lit<'a>),
    Normal(Instanced<'a>),
    Points(Points<'a>),
    Composed(Vec<Render<'a>>),
}

/// Draws collected per pipeline.
#[derive(Default)]
pub struct Batches<'a> {
    pub standards: Vec<Lit<'a>>,
    pub normals: Vec<Instanced<'a>>,
    pub points: Vec<Points<'a>>,
}

impl<'a> Render<'a> {
    pub(crate) fn set_pipelines(self, batches: &mut Batches<'a>) {
        match self {
            Render::Standard(lit) => batches.standards.push(lit),
            Render::Normal(instanced) => batches.normals.push(instanced),
            Render::Points(points) => batches.points.push(points),
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.set_pipelines(batches)),
        }
    }
}

impl<'a> From<Vec<Render<'a>>> for Render<'a> {
    fn from(renders: Vec<Render<'a>>) -> Self {
        Render::Composed(renders)
    }
}
