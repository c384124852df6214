//! Application configuration
//!
//! Re-exports the shared types from glowcalm-types and provides persistence
//! for AppConfig through confy.

use std::path::PathBuf;

pub use glowcalm_types::{AppConfig, AudioSettings, DEFAULT_TECHNIQUE, VisualSettings, VoiceSettings};

use super::error::ConfigError;
use crate::catalog::TechniqueCatalog;

/// confy application name; also the config directory name
pub const APP_ID: &str = "glowcalm";
const CONFIG_NAME: &str = "config";

/// Path of the persisted config file
pub fn config_path() -> Result<PathBuf, ConfigError> {
    confy::get_configuration_file_path(APP_ID, CONFIG_NAME).map_err(ConfigError::Locate)
}

/// Directory holding the config file, user techniques and ambient sounds
pub fn config_dir() -> Option<PathBuf> {
    config_path()
        .ok()
        .and_then(|path| path.parent().map(PathBuf::from))
        .or_else(|| dirs::config_dir().map(|dir| dir.join(APP_ID)))
}

// ─────────────────────────────────────────────────────────────────────────────
// AppConfig Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for AppConfig persistence
pub trait AppConfigExt: Sized {
    /// Load the stored config, falling back to defaults if it cannot be read
    fn load() -> Self;
    fn try_load() -> Result<Self, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    /// Change the startup technique, checking it exists in `catalog`
    fn set_default_technique(
        &mut self,
        key: &str,
        catalog: &TechniqueCatalog,
    ) -> Result<(), ConfigError>;
}

impl AppConfigExt for AppConfig {
    fn load() -> Self {
        Self::try_load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Using default configuration");
            Self::default()
        })
    }

    fn try_load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_ID, CONFIG_NAME)?)
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_ID, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn set_default_technique(
        &mut self,
        key: &str,
        catalog: &TechniqueCatalog,
    ) -> Result<(), ConfigError> {
        if catalog.get(key).is_none() {
            return Err(ConfigError::UnknownTechnique {
                key: key.to_string(),
            });
        }
        self.default_technique = key.to_string();
        Ok(())
    }
}
