//! The background point cloud.

use rand::Rng;

use crate::config::ParticleConfig;

/// A fixed set of random points that rotates as a whole about the y axis.
#[derive(Debug, Clone)]
pub struct ParticleField {
    /// Flat `x, y, z` triples.
    positions: Vec<f32>,
    rotation_y: f32,
}

impl ParticleField {
    pub fn new(config: &ParticleConfig) -> Self {
        Self::with_rng(config, &mut rand::thread_rng())
    }

    /// Every coordinate is drawn independently from `[-half_extent, half_extent]`.
    pub fn with_rng<R: Rng + ?Sized>(config: &ParticleConfig, rng: &mut R) -> Self {
        let h = config.half_extent;
        let positions = (0..config.count * 3)
            .map(|_| rng.gen_range(-h..=h))
            .collect();
        Self {
            positions,
            rotation_y: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn points(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.positions.chunks_exact(3).map(|p| [p[0], p[1], p[2]])
    }

    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn spin(&mut self, delta: f32) {
        self.rotation_y += delta;
    }
}
