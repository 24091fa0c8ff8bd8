//! Game settings and preferences
//!
//! Persisted separately from high scores in LocalStorage.

use serde::{Deserialize, Serialize};

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Mute all audio
    #[serde(default)]
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    #[serde(default = "default_volume")]
    pub master_volume: f32,
    /// Draw the spawn-stream debug marker
    #[serde(default)]
    pub show_spawn_marker: bool,
}

fn default_volume() -> f32 {
    0.8
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muted: false,
            master_volume: default_volume(),
            show_spawn_marker: false,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "catchy_settings";

    /// Load from LocalStorage, falling back to defaults
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok())
            .flatten();
        match stored {
            Some(json) => serde_json::from_str(&json).unwrap_or_default(),
            None => Self::default(),
        }
    }

    /// Save to LocalStorage (best effort)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string(self)
            && let Some(storage) = web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
        {
            let _ = storage.set_item(Self::STORAGE_KEY, &json);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert!(!s.muted);
        assert_eq!(s.master_volume, 0.8);
        assert!(!s.show_spawn_marker);
    }

    #[test]
    fn test_roundtrip() {
        let s = Settings {
            muted: true,
            master_volume: 0.5,
            show_spawn_marker: true,
        };
        let json = serde_json::to_string(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert!(back.muted);
        assert_eq!(back.master_volume, 0.5);
        assert!(back.show_spawn_marker);
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let back: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(back.master_volume, 0.8);
        assert!(!back.muted);
    }
}
