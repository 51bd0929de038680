//! Game settings and run options
//!
//! Persisted as JSON in the working directory, or at the path given as the
//! binary's first argument.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::Perspective;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Camera ===
    /// Perspective at the start of a run
    pub perspective: Perspective,

    // === Run ===
    /// Fixed world seed; a time-based seed when absent
    pub seed: Option<u64>,
    /// Let the demo player drive
    pub autopilot: bool,
    /// Pace ticks to wall-clock time instead of running flat out
    pub realtime: bool,
    /// Stop after this many frames even if the run has not ended
    pub max_frames: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            perspective: Perspective::ThirdPerson,

            seed: None,
            autopilot: true,
            realtime: false,
            max_frames: 20_000,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "minion_mania_settings.json";

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to `path`
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
