//! Scene graph: groups of meshes with hierarchical transforms.
//!
//! A [`GroupNode`] owns its child [`MeshNode`]s for their whole lifetime.
//! World transforms are the group transform composed with each child's
//! local transform, recomputed on demand so that the per-frame update only
//! has to touch local values.

use crate::data_structures::instance::Instance;

/// A leaf that draws one piece of geometry.
#[derive(Clone, Debug)]
pub struct MeshNode<G> {
    pub name: String,
    pub local: Instance,
    pub geometry: G,
}

impl<G> MeshNode<G> {
    pub fn new(name: &str, geometry: G) -> Self {
        Self {
            name: name.to_string(),
            local: Instance::new(),
            geometry,
        }
    }
}

/// A transform node owning a list of meshes.
#[derive(Clone, Debug)]
pub struct GroupNode<G> {
    pub name: String,
    pub local: Instance,
    children: Vec<MeshNode<G>>,
}

impl<G> GroupNode<G> {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            local: Instance::new(),
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, child: MeshNode<G>) {
        self.children.push(child);
    }

    pub fn child(&self, name: &str) -> Option<&MeshNode<G>> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children(&self) -> &[MeshNode<G>] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// World transform of every child, in child order.
    pub fn world_transforms(&self, parent: &Instance) -> Vec<Instance> {
        let group = parent * &self.local;
        self.children
            .iter()
            .map(|child| &group * &child.local)
            .collect()
    }
}
