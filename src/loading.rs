//! Progress tracking for asynchronously loaded assets.
//!
//! A [`LoadingManager`] counts started and finished items and drives a
//! [`LoaderView`] (the overlay on the web, the log natively). It ends in
//! exactly one terminal state: [`LoaderStatus::Loaded`] fades the view out,
//! [`LoaderStatus::Failed`] leaves the error message on screen.

use crate::config::LoaderConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderStatus {
    Loading { percent: u32 },
    Loaded,
    Failed { message: String },
}

impl LoaderStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LoaderStatus::Loading { .. })
    }
}

/// Something that displays loading progress.
pub trait LoaderView {
    fn set_text(&mut self, text: &str);

    /// Start hiding the view; it leaves the layout after `delay_millis`.
    fn hide(&mut self, delay_millis: u32);
}

impl<V: LoaderView + ?Sized> LoaderView for Box<V> {
    fn set_text(&mut self, text: &str) {
        (**self).set_text(text)
    }

    fn hide(&mut self, delay_millis: u32) {
        (**self).hide(delay_millis)
    }
}

/// Reports progress through the `log` facade.
#[derive(Debug, Default)]
pub struct LogView;

impl LoaderView for LogView {
    fn set_text(&mut self, text: &str) {
        log::info!("{}", text);
    }

    fn hide(&mut self, delay_millis: u32) {
        log::debug!("loader hidden after {}ms", delay_millis);
    }
}

#[derive(Debug)]
pub struct LoadingManager<V> {
    config: LoaderConfig,
    view: V,
    items_loaded: usize,
    items_total: usize,
    status: LoaderStatus,
}

impl<V: LoaderView> LoadingManager<V> {
    pub fn new(config: LoaderConfig, view: V) -> Self {
        Self {
            config,
            view,
            items_loaded: 0,
            items_total: 0,
            status: LoaderStatus::Loading { percent: 0 },
        }
    }

    pub fn status(&self) -> &LoaderStatus {
        &self.status
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn items(&self) -> (usize, usize) {
        (self.items_loaded, self.items_total)
    }

    pub fn item_start(&mut self, url: &str) {
        if self.status.is_terminal() {
            log::warn!("ignoring {} started after loading finished", url);
            return;
        }
        self.items_total += 1;
        log::debug!("loading {} ({} items pending)", url, self.items_total - self.items_loaded);
    }

    /// Mark `url` as loaded. Completes the manager once every started item ended.
    pub fn item_end(&mut self, url: &str) {
        if self.status.is_terminal() {
            return;
        }
        self.items_loaded += 1;
        // an item that never announced its start still counts
        self.items_total = self.items_total.max(self.items_loaded);

        let percent = progress_percent(self.items_loaded, self.items_total);
        self.view.set_text(&self.config.progress_message(percent));
        log::debug!("loaded {} ({}%)", url, percent);

        if self.items_loaded == self.items_total {
            self.status = LoaderStatus::Loaded;
            self.view.hide(self.config.hide_delay_millis);
        } else {
            self.status = LoaderStatus::Loading { percent };
        }
    }

    /// Mark `url` as failed. The failure is terminal and the view stays visible.
    pub fn item_error(&mut self, url: &str, reason: &dyn std::fmt::Display) {
        log::error!("Error loading {}: {}", url, reason);
        if self.status.is_terminal() {
            return;
        }
        self.view.set_text(&self.config.error_message);
        self.status = LoaderStatus::Failed {
            message: self.config.error_message.clone(),
        };
    }
}

pub fn progress_percent(loaded: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (loaded as f64 / total as f64 * 100.0).round() as u32
}
