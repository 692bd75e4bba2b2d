//! Error types shared across the crate.
//!
//! Setup and IO paths return `anyhow::Result`; the variants below are the
//! failures that callers match on (the font load outcome in particular).

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A DOM element the page relies on does not exist.
    #[error("required element #{0} is missing from the document")]
    MissingElement(String),

    #[error("DOM operation failed: {0}")]
    Dom(String),

    /// Fetching or parsing an external asset failed.
    #[error("error loading {url}: {reason}")]
    AssetLoad { url: String, reason: String },

    #[error("malformed typeface: {0}")]
    Font(String),

    #[error("tessellation failed: {0}")]
    Tessellation(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn asset_load(url: &str, reason: impl ToString) -> Self {
        Self::AssetLoad {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for Error {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(format!("{:?}", value))
    }
}
