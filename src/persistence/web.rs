//! Browser storage backend

use super::Storage;

/// `localStorage` or `sessionStorage` of the current window
pub struct WebStorage {
    inner: web_sys::Storage,
}

impl WebStorage {
    /// Survives browser restarts
    pub fn local() -> Option<Self> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .map(|inner| Self { inner })
    }

    /// Lives as long as the tab
    pub fn session() -> Option<Self> {
        web_sys::window()
            .and_then(|w| w.session_storage().ok())
            .flatten()
            .map(|inner| Self { inner })
    }
}

impl Storage for WebStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.inner.get_item(key).ok().flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        if self.inner.set_item(key, value).is_err() {
            log::warn!("Failed to write '{key}' to web storage");
        }
    }

    fn remove_item(&mut self, key: &str) {
        let _ = self.inner.remove_item(key);
    }

    fn clear(&mut self) {
        let _ = self.inner.clear();
    }
}
