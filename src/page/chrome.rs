//! Navigational chrome layered over the page.
//!
//! Each control is a two-state machine driven only by scroll position and
//! clicks; there is no debouncing. The DOM wiring below is a thin shell that
//! feeds browser events into these machines.

/// Markup of the loader overlay. The last `div` holds the status text.
pub const LOADER_HTML: &str =
    r#"<div class="loader-spinner"></div><div>Loading 3D Scene...</div>"#;
pub const SCROLL_INDICATOR_HTML: &str =
    r#"<div class="arrow">↓</div><div class="text">Scroll to explore</div>"#;
pub const BACK_TO_TOP_HTML: &str = "↑";

/// Where a scroll control takes the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    /// One viewport height down from the top.
    NextScreen,
    Top,
}

impl ScrollTarget {
    pub fn offset(self, viewport_height: f64) -> f64 {
        match self {
            ScrollTarget::NextScreen => viewport_height,
            ScrollTarget::Top => 0.0,
        }
    }
}

/// Visibility of the back-to-top button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackToTop {
    visible: bool,
}

impl BackToTop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn should_show(scroll_y: f64, viewport_height: f64) -> bool {
        scroll_y > viewport_height / 2.0
    }

    /// Update for a new scroll position.
    ///
    /// Returns the new visibility when it changed, `None` otherwise.
    pub fn on_scroll(&mut self, scroll_y: f64, viewport_height: f64) -> Option<bool> {
        let visible = Self::should_show(scroll_y, viewport_height);
        if visible == self.visible {
            return None;
        }
        self.visible = visible;
        Some(visible)
    }

    pub fn target(&self) -> ScrollTarget {
        ScrollTarget::Top
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{LoaderOverlay, install, install_loader};

#[cfg(target_arch = "wasm32")]
mod web {
    use std::{cell::RefCell, rc::Rc};

    use wasm_bindgen::{JsCast, closure::Closure};

    use super::{BACK_TO_TOP_HTML, BackToTop, LOADER_HTML, SCROLL_INDICATOR_HTML, ScrollTarget};
    use crate::{error::Error, loading::LoaderView, page::dom};

    /// The `div.loader` overlay.
    pub struct LoaderOverlay {
        element: web_sys::HtmlElement,
        status: web_sys::Element,
    }

    impl LoaderView for LoaderOverlay {
        fn set_text(&mut self, text: &str) {
            self.status.set_text_content(Some(text));
        }

        fn hide(&mut self, delay_millis: u32) {
            if let Err(e) = self.element.style().set_property("opacity", "0") {
                log::warn!("cannot fade the loader: {:?}", e);
            }
            let element = self.element.clone();
            let remove = Closure::once_into_js(move || {
                if let Err(e) = element.style().set_property("display", "none") {
                    log::warn!("cannot hide the loader: {:?}", e);
                }
            });
            let scheduled = dom::window().and_then(|window| {
                window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(
                        remove.unchecked_ref(),
                        delay_millis as i32,
                    )
                    .map_err(Error::from)
            });
            if let Err(e) = scheduled {
                log::warn!("cannot schedule hiding the loader: {}", e);
            }
        }
    }

    /// Append the loader overlay to `<body>`.
    pub fn install_loader() -> Result<LoaderOverlay, Error> {
        let document = dom::document()?;
        let element: web_sys::HtmlElement = dom::create(&document, "div")?;
        element.set_class_name("loader");
        element.set_inner_html(LOADER_HTML);
        let status = element
            .last_element_child()
            .ok_or_else(|| Error::Dom("loader has no status line".into()))?;
        dom::body(&document)?.append_child(&element)?;
        Ok(LoaderOverlay { element, status })
    }

    fn scroll_to(target: ScrollTarget) -> Result<(), Error> {
        let window = dom::window()?;
        let options = web_sys::ScrollToOptions::new();
        options.set_top(target.offset(dom::viewport_height(&window)?));
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
        Ok(())
    }

    fn on_click(element: &web_sys::Element, target: ScrollTarget) -> Result<(), Error> {
        let closure = Closure::wrap(Box::new(move || {
            if let Err(e) = scroll_to(target) {
                log::error!("scrolling failed: {}", e);
            }
        }) as Box<dyn FnMut()>);
        element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        // Listeners live as long as the page.
        closure.forget();
        Ok(())
    }

    fn install_scroll_indicator(document: &web_sys::Document) -> Result<(), Error> {
        let indicator: web_sys::HtmlElement = dom::create(document, "div")?;
        indicator.set_class_name("scroll-indicator");
        indicator.set_inner_html(SCROLL_INDICATOR_HTML);
        dom::body(document)?.append_child(&indicator)?;
        on_click(&indicator, ScrollTarget::NextScreen)
    }

    fn install_back_to_top(document: &web_sys::Document) -> Result<(), Error> {
        let button: web_sys::HtmlElement = dom::create(document, "div")?;
        button.set_class_name("back-to-top");
        button.set_inner_html(BACK_TO_TOP_HTML);
        dom::body(document)?.append_child(&button)?;

        let state = Rc::new(RefCell::new(BackToTop::new()));
        on_click(&button, state.borrow().target())?;

        let window = dom::window()?;
        let listener_window = window.clone();
        let closure = Closure::wrap(Box::new(move || {
            let scroll_y = match listener_window.scroll_y() {
                Ok(y) => y,
                Err(e) => return log::warn!("scrollY unavailable: {:?}", e),
            };
            let height = match dom::viewport_height(&listener_window) {
                Ok(h) => h,
                Err(e) => return log::warn!("{}", e),
            };
            if let Some(visible) = state.borrow_mut().on_scroll(scroll_y, height) {
                if let Err(e) = button.class_list().toggle_with_force("visible", visible) {
                    log::warn!("cannot toggle back-to-top: {:?}", e);
                }
            }
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Add the scroll indicator and the back-to-top button to the page.
    pub fn install() -> Result<(), Error> {
        let document = dom::document()?;
        install_scroll_indicator(&document)?;
        install_back_to_top(&document)
    }
}
