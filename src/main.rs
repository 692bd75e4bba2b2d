#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    folio3d::run_native()
}

// The web build starts from `folio3d::start`.
#[cfg(target_arch = "wasm32")]
fn main() {}
