//! Settings for the dashboard process
//!
//! Layered in the usual order: built-in defaults, then `talkboard.toml`
//! next to the process, then environment variables. Nothing here is
//! required - a missing file just means defaults.

use crate::error::Result;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Process settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Path to the delimited talk data
    pub data_path: String,
    /// UI refresh interval in milliseconds
    pub refresh_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: "data/ted-talks.csv".into(),
            refresh_ms: 250,
        }
    }
}

impl Settings {
    /// Load `talkboard.toml` if present, then apply env overrides
    /// (`TALKBOARD_DATA`, `TALKBOARD_REFRESH_MS`).
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("talkboard.toml"))
    }

    /// Like [`Settings::load`] with an explicit file path, for tests
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut settings = match std::fs::read_to_string(path) {
            Ok(raw) => toml::from_str(&raw)?,
            Err(_) => {
                debug!("no settings file at {}, using defaults", path.display());
                Settings::default()
            }
        };

        if let Ok(v) = std::env::var("TALKBOARD_DATA") {
            settings.data_path = v;
        }
        if let Ok(v) = std::env::var("TALKBOARD_REFRESH_MS") {
            if let Ok(ms) = v.parse() {
                settings.refresh_ms = ms;
            }
        }
        Ok(settings)
    }
}
