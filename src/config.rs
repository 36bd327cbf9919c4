use crate::error::ConfigError;
use crate::overlay::Color4;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "IMAGE_EDITOR_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "image-editor.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window_size: (f32, f32),
    pub overlay_text: String,
    pub overlay_font_size: f32,
    pub overlay_color: Color4,
    /// Re-enable the open button after a cancelled or failed open.
    pub rearm_open_on_failure: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_size: (1200.0, 800.0),
            overlay_text: "Introduce your text here".to_string(),
            overlay_font_size: 20.0,
            overlay_color: Color4::WHITE,
            rearm_open_on_failure: true,
        }
    }
}

impl Settings {
    /// Loads settings from the configured path, falling back to defaults.
    pub fn load() -> Self {
        let path = settings_path(std::env::var_os(CONFIG_ENV));
        match Self::load_from(&path) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Ok(None) => {
                log::debug!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    /// `Ok(None)` when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(settings))
    }
}

fn settings_path(from_env: Option<OsString>) -> PathBuf {
    from_env
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}
