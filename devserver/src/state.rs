//! Shared dev server state.

use std::path::PathBuf;
use std::sync::Arc;

/// Read-only settings handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    inner: Arc<Settings>,
}

#[derive(Debug)]
struct Settings {
    pkg_dir: PathBuf,
    public_url: String,
    shop_id: String,
}

impl AppState {
    pub fn new(pkg_dir: PathBuf, public_url: &str, shop_id: String) -> Self {
        Self {
            inner: Arc::new(Settings { pkg_dir, public_url: public_url.trim_end_matches('/').to_owned(), shop_id }),
        }
    }

    /// Directory holding the `wasm-bindgen --target no-modules` output.
    pub fn pkg_dir(&self) -> &std::path::Path {
        &self.inner.pkg_dir
    }

    /// Origin the widget should load from and call back to, without a trailing `/`.
    pub fn public_url(&self) -> &str {
        &self.inner.public_url
    }

    /// Shop used by the demo page.
    pub fn shop_id(&self) -> &str {
        &self.inner.shop_id
    }

    pub fn is_secure(&self) -> bool {
        self.inner.public_url.starts_with("https://")
    }
}
