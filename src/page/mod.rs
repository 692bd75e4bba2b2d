//! The document around the 3D banner.
//!
//! - `chrome`: loader overlay, scroll indicator and back-to-top button
//! - `resume`: the resume document and its markup
//!
//! DOM access only exists on the web; the state machines and markup are
//! plain Rust so they run natively and in tests.

pub mod chrome;
pub mod resume;

/// Element that receives the WebGL canvas.
pub const SCENE_CONTAINER_ID: &str = "scene-container";
/// Element that receives the resume markup.
pub const APP_CONTAINER_ID: &str = "app";

#[cfg(target_arch = "wasm32")]
pub(crate) mod dom {
    use wasm_bindgen::JsCast;

    use crate::error::Error;

    pub fn window() -> Result<web_sys::Window, Error> {
        web_sys::window().ok_or_else(|| Error::Dom("no window".into()))
    }

    pub fn document() -> Result<web_sys::Document, Error> {
        window()?
            .document()
            .ok_or_else(|| Error::Dom("no document".into()))
    }

    pub fn element_by_id(document: &web_sys::Document, id: &str) -> Result<web_sys::Element, Error> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| Error::MissingElement(id.to_string()))
    }

    pub fn create<T: JsCast>(document: &web_sys::Document, tag: &str) -> Result<T, Error> {
        document
            .create_element(tag)?
            .dyn_into::<T>()
            .map_err(|e| Error::Dom(format!("<{tag}> has an unexpected type: {:?}", e)))
    }

    pub fn body(document: &web_sys::Document) -> Result<web_sys::HtmlElement, Error> {
        document
            .body()
            .ok_or_else(|| Error::Dom("document has no body".into()))
    }

    pub fn viewport_height(window: &web_sys::Window) -> Result<f64, Error> {
        window
            .inner_height()?
            .as_f64()
            .ok_or_else(|| Error::Dom("innerHeight is not a number".into()))
    }
}

/// Create the canvas for the renderer inside `#container_id`.
#[cfg(target_arch = "wasm32")]
pub fn mount_canvas(container_id: &str) -> Result<web_sys::HtmlCanvasElement, crate::error::Error> {
    let document = dom::document()?;
    let container = dom::element_by_id(&document, container_id)?;
    let canvas: web_sys::HtmlCanvasElement = dom::create(&document, "canvas")?;
    canvas.style().set_property("width", "100%")?;
    canvas.style().set_property("height", "100%")?;
    container.append_child(&canvas)?;
    Ok(canvas)
}
