use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::mode::{HighlightMode, Theme};

/// Application settings, persisted to `~/.config/acebridge/settings.json`.
///
/// The `#[serde(default)]` on the struct ensures that any fields missing from
/// an existing settings file are filled in with their `Default` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ── Window ───────────────────────────────────────────────────────────
    pub window_width: i32,
    pub window_height: i32,

    // ── Editor ───────────────────────────────────────────────────────────
    pub highlight_mode: HighlightMode,
    pub theme: Theme,
    pub read_only: bool,
    pub initial_text: String,

    /// Directory holding the Ace distribution. `None` means `ace/` next to
    /// the extracted bootstrap page.
    pub ace_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            window_width: 1000,
            window_height: 700,
            highlight_mode: HighlightMode::default(),
            theme: Theme::default(),
            read_only: false,
            initial_text: String::new(),
            ace_dir: None,
        }
    }
}

pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
    config.join("acebridge").join("settings.json")
}

pub fn load() -> Settings {
    load_from(&settings_path())
}

pub fn save(settings: &Settings) -> Result<(), String> {
    save_to(&settings_path(), settings)
}

/// Read settings from `path`. A missing file gives defaults; an unreadable
/// one gives defaults and a warning.
pub fn load_from(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed settings {:?}: {}", path, e);
            Settings::default()
        }),
        Err(_) => Settings::default(),
    }
}

pub fn save_to(path: &Path, settings: &Settings) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create settings directory: {}", e))?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {}", e))?;
    std::fs::write(path, json).map_err(|e| format!("Failed to write {:?}: {}", path, e))
}
