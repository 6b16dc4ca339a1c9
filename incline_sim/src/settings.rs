//! Application settings loaded from TOML
//!
//! ```toml
//! [window]
//! title = "Free Body Diagram - Block on an Incline"
//! width = 1400
//! height = 860
//!
//! [diagram]
//! zoom = 1.0
//!
//! [guided]
//! start_gated = true
//!
//! [initial]
//! angle = 30
//! showMass = true
//! ```

use std::path::Path;

use common::{MAX_ZOOM, MIN_ZOOM};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::simulation::ConfigPatch;

/// File looked up in the working directory when no path is given
pub const DEFAULT_SETTINGS_FILE: &str = "incline_sim.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Free Body Diagram - Block on an Incline".to_string(),
            width: 1400,
            height: 860,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagramSettings {
    /// Initial zoom, clamped by the camera
    pub zoom: f32,
}

impl Default for DiagramSettings {
    fn default() -> Self {
        Self { zoom: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuidedSettings {
    /// Wait for an explicit start before showing step 1
    pub start_gated: bool,
}

impl Default for GuidedSettings {
    fn default() -> Self {
        Self { start_gated: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppSettings {
    pub window: WindowSettings,
    pub diagram: DiagramSettings,
    pub guided: GuidedSettings,
    /// Applied over the simulation defaults at start-up
    pub initial: ConfigPatch,
}

impl AppSettings {
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let settings: AppSettings = toml::from_str(source)?;
        let zoom = settings.diagram.zoom;
        if !zoom.is_finite() {
            return Err(ConfigError::OutOfRange {
                field: "zoom",
                value: zoom,
                min: MIN_ZOOM,
                max: MAX_ZOOM,
            });
        }
        settings.initial.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml(&source)
    }

    /// Load `path`, or [`DEFAULT_SETTINGS_FILE`] if present, falling back to
    /// defaults when the file is missing or invalid.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path,
            None => {
                let default = Path::new(DEFAULT_SETTINGS_FILE);
                if !default.exists() {
                    log::debug!("no {DEFAULT_SETTINGS_FILE}, using default settings");
                    return Self::default();
                }
                default
            }
        };

        match Self::load(path) {
            Ok(settings) => {
                log::info!("loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("ignoring settings {}: {err}", path.display());
                Self::default()
            }
        }
    }
}
