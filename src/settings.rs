//! Player preferences
//!
//! Persisted as one JSON blob, separately from the score counters.

use serde::{Deserialize, Serialize};

use crate::persistence::{Storage, load_json, save_json};
use crate::sim::Difficulty;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty used when none is picked explicitly
    pub difficulty: Difficulty,
    /// Start as soon as the game is set up instead of waiting for a click
    pub autostart: bool,
    /// Pause when the window loses focus, resume when it comes back
    pub pause_on_blur: bool,
    /// Keyboard shortcuts (start/stop/restart/pause)
    pub shortcuts: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            autostart: false,
            pause_on_blur: true,
            shortcuts: true,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "bounce_settings";

    /// Load settings, falling back to defaults
    pub fn load(storage: &dyn Storage) -> Self {
        match load_json(storage, Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings from storage");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        save_json(storage, Self::STORAGE_KEY, self);
        log::info!("Settings saved");
    }
}
