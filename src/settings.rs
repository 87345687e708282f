// User settings, persisted to localStorage as JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::RenderOptions;
use crate::util::cwarn;
use crate::win::ScanMode;

pub const SETTINGS_KEY: &str = "itt_settings";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Skip win-line decorations that lie entirely off screen.
    pub cull_win_lines: bool,
    pub scan_mode: ScanMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cull_win_lines: false,
            scan_mode: ScanMode::Incremental,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("localStorage is not available")]
    StorageUnavailable,
    #[error("storage access failed: {0}")]
    Storage(String),
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
}

impl Settings {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            cull_win_lines: self.cull_win_lines,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reads the stored settings. `Ok(None)` when nothing was saved yet.
    pub fn load() -> Result<Option<Self>, SettingsError> {
        let store = local_storage()?;
        let raw = store
            .get_item(SETTINGS_KEY)
            .map_err(|e| SettingsError::Storage(format!("{e:?}")))?;
        raw.map(|r| Self::from_json(&r)).transpose()
    }

    /// Stored settings, falling back to defaults on any failure.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(Some(s)) => s,
            Ok(None) => Self::default(),
            Err(e) => {
                cwarn(&format!("settings: using defaults ({e})"));
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        let store = local_storage()?;
        store
            .set_item(SETTINGS_KEY, &self.to_json()?)
            .map_err(|e| SettingsError::Storage(format!("{e:?}")))
    }
}

fn local_storage() -> Result<web_sys::Storage, SettingsError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(SettingsError::StorageUnavailable)
}
