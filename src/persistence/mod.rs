//! Key-value storage backends
//!
//! Modelled on Web Storage: string keys, string values. Typed values are
//! stored as JSON. Backends:
//! - `MemoryStorage`: in-process map (native builds, tests)
//! - `WebStorage`: `localStorage`/`sessionStorage` (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebStorage;

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&mut self, key: &str, value: &str);

    fn remove_item(&mut self, key: &str);

    fn clear(&mut self);
}

/// Storage that lives as long as the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }

    fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

/// Read a JSON value; missing or unreadable entries yield `None`
pub fn load_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Option<T> {
    let json = storage.get_item(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring unreadable '{key}' in storage: {e}");
            None
        }
    }
}

/// Write a value as JSON
pub fn save_json<T: Serialize>(storage: &mut dyn Storage, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => storage.set_item(key, &json),
        Err(e) => log::warn!("Could not serialize '{key}': {e}"),
    }
}
