/**
 * This module contains all logic for loading and generating geometry:
 * fetching assets, parsing typefaces, extruding text, and building the
 * placeholder and particle primitives.
 */
pub mod font;
pub mod particles;
pub mod primitives;
pub mod text;

#[cfg(target_arch = "wasm32")]
fn format_url(file_name: &str) -> anyhow::Result<reqwest::Url> {
    let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let origin = window
        .location()
        .origin()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let base = reqwest::Url::parse(&format!("{}/assets/", origin))?;
    Ok(base.join(file_name)?)
}

fn is_remote(file_name: &str) -> bool {
    file_name.starts_with("http://") || file_name.starts_with("https://")
}

/// Load a text asset.
///
/// Absolute `http(s)` URLs are fetched over the network on every platform.
/// Anything else is relative to the `assets` folder: served next to the page
/// on the web, read from `./assets` natively.
pub async fn load_string(file_name: &str) -> anyhow::Result<String> {
    if is_remote(file_name) {
        let txt = reqwest::get(file_name)
            .await?
            .error_for_status()?
            .text()
            .await?;
        return Ok(txt);
    }

    #[cfg(target_arch = "wasm32")]
    let txt = {
        let url = format_url(file_name)?;
        reqwest::get(url).await?.error_for_status()?.text().await?
    };
    #[cfg(not(target_arch = "wasm32"))]
    let txt = {
        let path = std::path::Path::new("./").join("assets").join(file_name);
        tokio::fs::read_to_string(path).await?
    };

    Ok(txt)
}
