//! Engine data structures: meshes, textures, scene graphs, and instances.
//!
//! - `model` contains vertex layouts and GPU meshes
//! - `texture` contains the depth texture wrapper
//! - `instance` holds per-instance transformation data
//! - `scene_graph` groups meshes under a shared transform

pub mod instance;
pub mod model;
pub mod scene_graph;
pub mod texture;
