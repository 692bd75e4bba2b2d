//! Procedural primitives.

use crate::data_structures::model::{MeshData, ModelVertex};

/// An axis-aligned box centered on the origin.
///
/// Each face has its own four vertices so normals stay per-face; faces are
/// wound counter-clockwise when seen from outside.
pub fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let (hx, hy, hz) = (width / 2.0, height / 2.0, depth / 2.0);
    // (normal, u axis, v axis) with u x v == normal
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v) in faces {
        let base = vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let axis = |i: usize| normal[i] + su * u[i] + sv * v[i];
            vertices.push(ModelVertex {
                position: [axis(0) * hx, axis(1) * hy, axis(2) * hz],
                normal,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    MeshData { vertices, indices }
}
