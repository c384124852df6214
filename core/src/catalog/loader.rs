//! User technique loading
//!
//! Reads extra or replacement techniques from a TOML file:
//!
//! ```toml
//! [[technique]]
//! key = "evening_wind_down"
//! name = "Evening Wind Down"
//! category = "sleep"
//! cycle = { expand_secs = 4, contract_secs = 6, hold_contract_secs = 2 }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::Technique;
use super::error::CatalogError;

/// File name looked up in the config directory
pub const TECHNIQUES_FILE: &str = "techniques.toml";

#[derive(Debug, Deserialize)]
struct TechniqueFile {
    #[serde(default, rename = "technique")]
    techniques: Vec<Technique>,
}

/// Load and validate technique definitions from a single TOML file
pub fn load_techniques_from_file(path: &Path) -> Result<Vec<Technique>, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let file: TechniqueFile = toml::from_str(&content).map_err(|source| CatalogError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;

    let invalid = |key: &str, reason: String| CatalogError::InvalidDefinition {
        path: path.to_path_buf(),
        key: key.to_string(),
        reason,
    };

    let mut seen = HashSet::new();
    for technique in &file.techniques {
        if technique.key.trim().is_empty() {
            return Err(invalid(&technique.key, "key must not be empty".to_string()));
        }
        if !seen.insert(technique.key.as_str()) {
            return Err(invalid(&technique.key, "key is defined twice".to_string()));
        }
        technique
            .cycle
            .validate()
            .map_err(|e| invalid(&technique.key, e.to_string()))?;
    }

    tracing::debug!(
        path = %path.display(),
        count = file.techniques.len(),
        "Loaded technique definitions"
    );
    Ok(file.techniques)
}
