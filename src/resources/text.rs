//! Extruded, beveled text geometry.
//!
//! Contours from [`Typeface::layout`] are extruded along +z from `0` to
//! `depth`. With a bevel, additional rings are inserted in front of and
//! behind the extrusion: the contour grows from `offset` to `size + offset`
//! along a quarter circle while z moves by `thickness`, so the caps sit at
//! `-thickness` and `depth + thickness`. Caps are tessellated with lyon;
//! the walls are quads between consecutive rings. Every triangle gets its
//! own vertices and face normal (flat shading).

use cgmath::{InnerSpace, Vector2, Vector3};
use lyon::{
    math::point,
    path::Path,
    tessellation::{BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers},
};

use crate::{
    config::TextStyle,
    data_structures::model::{Geometry, ModelVertex},
    error::Error,
    resources::font::{Contour, Typeface},
};

/// Axis-aligned bounds of a set of positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl BoundingBox {
    pub fn empty() -> Self {
        Self {
            min: Vector3::new(0.0, 0.0, 0.0),
            max: Vector3::new(0.0, 0.0, 0.0),
        }
    }

    pub fn from_vertices(vertices: &[ModelVertex]) -> Self {
        let mut positions = vertices.iter().map(|v| Vector3::from(v.position));
        let Some(first) = positions.next() else {
            return Self::empty();
        };
        positions.fold(Self { min: first, max: first }, |bb, p| Self {
            min: Vector3::new(bb.min.x.min(p.x), bb.min.y.min(p.y), bb.min.z.min(p.z)),
            max: Vector3::new(bb.max.x.max(p.x), bb.max.y.max(p.y), bb.max.z.max(p.z)),
        })
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }
}

#[derive(Debug, Clone)]
pub struct TextGeometry {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
    bounding_box: BoundingBox,
}

/// One ring of the extrusion: every contour pushed out by `inset` at depth `z`.
#[derive(Debug, Clone, Copy)]
struct Layer {
    z: f32,
    inset: f32,
}

struct PreparedContour {
    points: Contour,
    /// Per-vertex miter direction pointing out of the solid.
    offsets: Vec<Vector2<f32>>,
    /// Per-edge normal pointing out of the solid; edge `i` runs from `i` to `i + 1`.
    edge_normals: Vec<Vector2<f32>>,
}

impl TextGeometry {
    pub fn new(typeface: &Typeface, text: &str, style: &TextStyle) -> Result<Self, Error> {
        let contours = typeface.layout(text, style.size, style.curve_segments)?;
        Self::from_contours(&contours, style)
    }

    pub fn from_contours(contours: &[Contour], style: &TextStyle) -> Result<Self, Error> {
        let prepared = prepare_contours(contours);
        let layers = layers(style);
        let mut geometry = Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            bounding_box: BoundingBox::empty(),
        };
        if prepared.is_empty() {
            return Ok(geometry);
        }

        let (Some(front), Some(back)) = (layers.first(), layers.last()) else {
            return Ok(geometry);
        };
        geometry.add_cap(&prepared, *front, -1.0)?;
        geometry.add_cap(&prepared, *back, 1.0)?;
        for pair in layers.windows(2) {
            for contour in &prepared {
                geometry.add_wall(contour, pair[0], pair[1]);
            }
        }

        geometry.compute_bounding_box();
        Ok(geometry)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn compute_bounding_box(&mut self) -> BoundingBox {
        self.bounding_box = BoundingBox::from_vertices(&self.vertices);
        self.bounding_box
    }

    /// Translate the geometry so its bounding box is centered on the origin.
    pub fn center(&mut self) {
        let center = self.compute_bounding_box().center();
        for vertex in &mut self.vertices {
            let p = Vector3::from(vertex.position) - center;
            vertex.position = p.into();
        }
        self.compute_bounding_box();
    }

    fn push_triangle(&mut self, a: Vector3<f32>, b: Vector3<f32>, c: Vector3<f32>, normal: Vector3<f32>) {
        let normal: [f32; 3] = normal.into();
        for position in [a, b, c] {
            self.indices.push(self.vertices.len() as u32);
            self.vertices.push(ModelVertex {
                position: position.into(),
                normal,
            });
        }
    }

    fn add_cap(&mut self, contours: &[PreparedContour], layer: Layer, facing: f32) -> Result<(), Error> {
        let mut builder = Path::builder();
        for contour in contours {
            let mut points = contour
                .points
                .iter()
                .zip(&contour.offsets)
                .map(|(p, o)| *p + *o * layer.inset);
            let Some(first) = points.next() else {
                continue;
            };
            builder.begin(point(first.x, first.y));
            for p in points {
                builder.line_to(point(p.x, p.y));
            }
            builder.end(true);
        }
        let path = builder.build();

        let mut buffers: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
        FillTessellator::new()
            .tessellate_path(
                &path,
                &FillOptions::default().with_fill_rule(FillRule::NonZero),
                &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex| {
                    let p = vertex.position();
                    [p.x, p.y]
                }),
            )
            .map_err(|e| Error::Tessellation(format!("{:?}", e)))?;

        let normal = Vector3::new(0.0, 0.0, facing);
        let at = |i: u32| {
            let [x, y] = buffers.vertices[i as usize];
            Vector3::new(x, y, layer.z)
        };
        for tri in buffers.indices.chunks_exact(3) {
            let (a, mut b, mut c) = (at(tri[0]), at(tri[1]), at(tri[2]));
            if (b - a).cross(c - a).z * facing < 0.0 {
                std::mem::swap(&mut b, &mut c);
            }
            self.push_triangle(a, b, c, normal);
        }
        Ok(())
    }

    fn add_wall(&mut self, contour: &PreparedContour, near: Layer, far: Layer) {
        let n = contour.points.len();
        let ring = |layer: Layer, i: usize| {
            let p = contour.points[i] + contour.offsets[i] * layer.inset;
            Vector3::new(p.x, p.y, layer.z)
        };
        for i in 0..n {
            let j = (i + 1) % n;
            let (a0, a1) = (ring(near, i), ring(near, j));
            let (b0, b1) = (ring(far, i), ring(far, j));
            let outward = contour.edge_normals[i];
            for (p, mut q, mut r) in [(a0, a1, b1), (a0, b1, b0)] {
                let mut normal = (q - p).cross(r - p);
                if normal.magnitude2() < 1e-12 {
                    continue;
                }
                if normal.x * outward.x + normal.y * outward.y < 0.0 {
                    std::mem::swap(&mut q, &mut r);
                    normal = -normal;
                }
                self.push_triangle(p, q, r, normal.normalize());
            }
        }
    }
}

impl Geometry for TextGeometry {
    fn vertices(&self) -> &[ModelVertex] {
        &self.vertices
    }

    fn indices(&self) -> &[u32] {
        &self.indices
    }
}

fn layers(style: &TextStyle) -> Vec<Layer> {
    let Some(bevel) = style.bevel else {
        return vec![
            Layer { z: 0.0, inset: 0.0 },
            Layer {
                z: style.depth,
                inset: 0.0,
            },
        ];
    };

    let quarter = std::f32::consts::FRAC_PI_2;
    let segments = bevel.segments.max(1);
    let ring = |i: u32| {
        let t = i as f32 / segments as f32;
        (
            bevel.thickness * (t * quarter).cos(),
            bevel.size * (t * quarter).sin() + bevel.offset,
        )
    };

    let mut layers: Vec<Layer> = (0..segments)
        .map(ring)
        .map(|(z, inset)| Layer { z: -z, inset })
        .collect();
    let full = bevel.size + bevel.offset;
    layers.push(Layer { z: 0.0, inset: full });
    layers.push(Layer {
        z: style.depth,
        inset: full,
    });
    layers.extend(
        (0..segments)
            .rev()
            .map(ring)
            .map(|(z, inset)| Layer {
                z: style.depth + z,
                inset,
            }),
    );
    layers
}

fn signed_area(points: &[Vector2<f32>]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let (p, q) = (points[i], points[(i + 1) % n]);
            p.x * q.y - q.x * p.y
        })
        .sum::<f32>()
        * 0.5
}

/// Classify holes and compute outward normals and miter offsets.
///
/// Solids share the winding of the largest contour; contours wound the
/// other way are holes and their outward direction points into the hole.
fn prepare_contours(contours: &[Contour]) -> Vec<PreparedContour> {
    let areas: Vec<f32> = contours.iter().map(|c| signed_area(c)).collect();
    let Some(reference) = areas
        .iter()
        .copied()
        .filter(|a| a.abs() > f32::EPSILON)
        .max_by(|a, b| a.abs().total_cmp(&b.abs()))
    else {
        return Vec::new();
    };

    contours
        .iter()
        .zip(areas)
        .filter(|(_, area)| area.abs() > f32::EPSILON)
        .map(|(points, area)| {
            let winding = area.signum();
            let is_hole = winding != reference.signum();
            let sign = if is_hole { -winding } else { winding };
            let n = points.len();
            let edge_normals: Vec<Vector2<f32>> = (0..n)
                .map(|i| {
                    let d = points[(i + 1) % n] - points[i];
                    let len = d.magnitude();
                    if len > 0.0 {
                        Vector2::new(d.y, -d.x) * (sign / len)
                    } else {
                        Vector2::new(0.0, 0.0)
                    }
                })
                .collect();
            let offsets = (0..n)
                .map(|i| miter(edge_normals[(i + n - 1) % n], edge_normals[i]))
                .collect();
            PreparedContour {
                points: points.clone(),
                offsets,
                edge_normals,
            }
        })
        .collect()
}

/// Offset direction at a corner so that both adjacent edges move by one unit.
fn miter(before: Vector2<f32>, after: Vector2<f32>) -> Vector2<f32> {
    const MAX_LENGTH: f32 = 3.0;
    let denom = 1.0 + before.dot(after);
    if denom < 1e-4 {
        return before;
    }
    let m = (before + after) / denom;
    let len = m.magnitude();
    if len > MAX_LENGTH { m * (MAX_LENGTH / len) } else { m }
}
