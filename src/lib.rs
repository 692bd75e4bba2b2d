//! folio3d
//!
//! A portfolio page whose header is a real-time 3D banner: the owner's name
//! and title as extruded, beveled text spinning above a slowly rotating
//! particle field. The page around it (loader overlay, scroll controls and
//! the resume itself) is driven from the same crate. The banner renders with
//! wgpu on WebGL in the browser and natively for previews.
//!
//! High-level modules
//! - `banner`: the banner scene state and the flow that renders it
//! - `camera`: camera, projection, damped orbit controller and uniforms
//! - `config`: typed scene configuration with defaults and validation
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `data_structures`: meshes, instances, scene graph nodes and depth textures
//! - `flow`: flow control and the application event loop
//! - `loading`: progress tracking for asynchronously loaded assets
//! - `page`: DOM chrome and resume markup
//! - `pipelines`: standard, normal and point render pipelines
//! - `resources`: asset loading, typefaces and generated geometry
//! - `render`: render composition for efficient pipeline reuse
//! - `schedule`: frame clocks and the stop signal
//!

pub mod banner;
pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod flow;
pub mod loading;
pub mod page;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod schedule;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use error::Error;
pub use wgpu;
pub use winit::event::WindowEvent;

use crate::{
    banner::BannerEvent, config::SceneConfig, flow::FlowConstructor, loading::LoaderView,
    page::resume::Resume,
};

/// Scene configuration with the banner text taken from `resume`.
///
/// The document's `banner` block wins; without one the profile is used.
pub fn scene_config(resume: &Resume) -> SceneConfig {
    let config = SceneConfig::default();
    match &resume.banner {
        Some(banner) => config.with_banner(&banner.headline, &banner.subtitle),
        None => config.with_profile(&resume.profile.name, &resume.profile.title),
    }
}

fn banner_constructor(
    resume: &Resume,
    view: Box<dyn LoaderView>,
) -> Result<FlowConstructor<BannerEvent>, Error> {
    banner::constructor(scene_config(resume), view)
}

/// Open the banner in a native window; loading progress goes to the log.
#[cfg(not(target_arch = "wasm32"))]
pub fn run_native() -> anyhow::Result<()> {
    let resume = Resume::bundled()?;
    let constructor = banner_constructor(&resume, Box::new(loading::LogView))?;
    flow::run(vec![constructor])
}

/// Page entry point: injects the resume, adds the chrome and starts the banner.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() -> Result<(), wasm_bindgen::JsValue> {
    let to_js = |e: Error| wasm_bindgen::JsValue::from_str(&e.to_string());

    let resume = Resume::bundled().map_err(to_js)?;
    page::resume::inject(page::APP_CONTAINER_ID, &page::resume::render_html(&resume))
        .map_err(to_js)?;
    let overlay = page::chrome::install_loader().map_err(to_js)?;
    page::chrome::install().map_err(to_js)?;

    let constructor = banner_constructor(&resume, Box::new(overlay)).map_err(to_js)?;
    flow::run(vec![constructor]).map_err(|e| wasm_bindgen::JsValue::from_str(&format!("{:#}", e)))
}
