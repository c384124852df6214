//! Breathing technique catalog
//!
//! Built-in presets come from a compile-time table. Users can add techniques,
//! or replace a preset by reusing its key, in `techniques.toml` next to the
//! application config.

mod error;
mod loader;
mod presets;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::breathing::CycleConfig;

pub use error::CatalogError;
pub use loader::{TECHNIQUES_FILE, load_techniques_from_file};
pub use presets::{PRESETS, Preset, get_preset};

/// What a technique is mainly used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Relaxation,
    Focus,
    Sleep,
    Energy,
    Balance,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Relaxation => "Relaxation",
            Category::Focus => "Focus",
            Category::Sleep => "Sleep",
            Category::Energy => "Energy",
            Category::Balance => "Balance",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        })
    }
}

fn default_color() -> [u8; 4] {
    [59, 130, 246, 255]
}

/// A named breathing technique.
///
/// Only `cycle` drives the sequencer; the rest is display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technique {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default = "default_color")]
    pub color: [u8; 4],
    pub cycle: CycleConfig,
}

impl Technique {
    fn from_preset(key: &str, preset: &Preset) -> Self {
        Self {
            key: key.to_string(),
            name: preset.name.to_string(),
            description: preset.description.to_string(),
            category: preset.category,
            difficulty: preset.difficulty,
            benefits: preset.benefits.iter().map(|b| b.to_string()).collect(),
            color: preset.color,
            cycle: preset.cycle,
        }
    }
}

/// Ordered collection of techniques, looked up by key
#[derive(Debug, Clone)]
pub struct TechniqueCatalog {
    techniques: Vec<Technique>,
}

impl Default for TechniqueCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TechniqueCatalog {
    /// Catalog containing only the built-in presets
    pub fn builtin() -> Self {
        let techniques = PRESETS
            .entries()
            .map(|(key, preset)| Technique::from_preset(key, preset))
            .collect();
        Self { techniques }
    }

    /// Built-in presets plus `techniques.toml` from `config_dir`, if present
    pub fn load(config_dir: &Path) -> Result<Self, CatalogError> {
        let mut catalog = Self::builtin();
        let path = config_dir.join(TECHNIQUES_FILE);
        if path.exists() {
            catalog.merge(load_techniques_from_file(&path)?);
        }
        Ok(catalog)
    }

    /// Add techniques, replacing existing entries with the same key in place
    pub fn merge(&mut self, techniques: Vec<Technique>) {
        for technique in techniques {
            match self.techniques.iter_mut().find(|t| t.key == technique.key) {
                Some(existing) => {
                    tracing::debug!(key = %technique.key, "Overriding technique");
                    *existing = technique;
                }
                None => self.techniques.push(technique),
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Technique> {
        self.techniques.iter().find(|t| t.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Technique> {
        self.techniques.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.techniques.iter().map(|t| t.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.techniques.len()
    }

    pub fn is_empty(&self) -> bool {
        self.techniques.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use glowcalm_types::DEFAULT_TECHNIQUE;

    #[test]
    fn presets_are_valid_configurations() {
        for (key, preset) in PRESETS.entries() {
            assert!(preset.cycle.validate().is_ok(), "{key} is invalid");
            assert!(!preset.benefits.is_empty(), "{key} has no benefits");
        }
    }

    #[test]
    fn builtin_keeps_table_order_and_default() {
        let catalog = TechniqueCatalog::builtin();
        assert_eq!(catalog.len(), PRESETS.len());
        assert_eq!(catalog.keys().next(), Some(DEFAULT_TECHNIQUE));

        let box_breathing = catalog.get(DEFAULT_TECHNIQUE).unwrap();
        assert_eq!(box_breathing.name, "Box Breathing");
        assert_eq!(box_breathing.cycle, CycleConfig::new(4.0, 4.0, 4.0, 4.0));
        assert_eq!(box_breathing.cycle.total_cycle_secs(), 16.0);

        let relaxing = get_preset("relaxing_breath").unwrap();
        assert_eq!(relaxing.cycle.hold_expand_secs, 7.0);
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn merge_overrides_in_place_and_appends() {
        let mut catalog = TechniqueCatalog::builtin();
        let mut replacement = catalog.get("box_breathing").unwrap().clone();
        replacement.cycle = CycleConfig::new(5.0, 5.0, 5.0, 5.0);
        let extra = Technique {
            key: "custom".to_string(),
            name: "Custom".to_string(),
            description: String::new(),
            category: Category::Sleep,
            difficulty: Difficulty::Beginner,
            benefits: Vec::new(),
            color: default_color(),
            cycle: CycleConfig::default(),
        };

        catalog.merge(vec![replacement, extra]);

        assert_eq!(catalog.len(), PRESETS.len() + 1);
        assert_eq!(catalog.keys().next(), Some("box_breathing"));
        assert_eq!(catalog.get("box_breathing").unwrap().cycle.expand_secs, 5.0);
        assert_eq!(catalog.keys().last(), Some("custom"));
    }

    #[test]
    fn load_without_file_is_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = TechniqueCatalog::load(dir.path()).unwrap();
        assert_eq!(catalog.len(), PRESETS.len());
    }

    #[test]
    fn load_reads_techniques_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join(TECHNIQUES_FILE)).unwrap();
        writeln!(
            file,
            r#"
            [[technique]]
            key = "energizing_breath"
            name = "Gentle Energizer"
            category = "energy"
            cycle = {{ expand_secs = 3, contract_secs = 3 }}
            "#
        )
        .unwrap();

        let catalog = TechniqueCatalog::load(dir.path()).unwrap();
        assert_eq!(catalog.len(), PRESETS.len());
        let energizer = catalog.get("energizing_breath").unwrap();
        assert_eq!(energizer.name, "Gentle Energizer");
        assert_eq!(energizer.cycle.expand_secs, 3.0);
    }
}
