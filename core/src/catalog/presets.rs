//! Built-in breathing techniques
//!
//! Ordered so listings follow the table: gentle techniques first, the long
//! retention practice last.

use phf::phf_ordered_map;

use super::{Category, Difficulty};
use crate::breathing::CycleConfig;

/// Compile-time technique entry
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub difficulty: Difficulty,
    pub benefits: &'static [&'static str],
    /// RGBA color of the breathing circle
    pub color: [u8; 4],
    pub cycle: CycleConfig,
}

/// Get a preset by catalog key
pub fn get_preset(key: &str) -> Option<&'static Preset> {
    PRESETS.get(key)
}

pub static PRESETS: phf::OrderedMap<&'static str, Preset> = phf_ordered_map! {
    "box_breathing" => Preset {
        name: "Box Breathing",
        description: "Equal counts of inhale, hold, exhale and hold. Steadies the mind under pressure.",
        category: Category::Focus,
        difficulty: Difficulty::Beginner,
        benefits: &["Reduces stress", "Improves concentration", "Regulates the nervous system"],
        color: [59, 130, 246, 255],
        cycle: CycleConfig::new(4.0, 4.0, 4.0, 4.0),
    },
    "relaxing_breath" => Preset {
        name: "4-7-8 Breathing",
        description: "A long hold and a slow exhale that help the body wind down before sleep.",
        category: Category::Sleep,
        difficulty: Difficulty::Intermediate,
        benefits: &["Helps you fall asleep", "Eases anxiety", "Slows the heart rate"],
        color: [168, 85, 247, 255],
        cycle: CycleConfig::new(4.0, 7.0, 8.0, 0.0),
    },
    "coherent_breathing" => Preset {
        name: "Coherent Breathing",
        description: "Slow, even breaths at about five and a half breaths per minute.",
        category: Category::Balance,
        difficulty: Difficulty::Beginner,
        benefits: &["Improves heart rate variability", "Calms the mind", "Easy to sustain"],
        color: [20, 184, 166, 255],
        cycle: CycleConfig::new(5.5, 0.0, 5.5, 0.0),
    },
    "extended_exhale" => Preset {
        name: "Extended Exhale",
        description: "Breathe out twice as long as you breathe in to trigger the relaxation response.",
        category: Category::Relaxation,
        difficulty: Difficulty::Beginner,
        benefits: &["Lowers tension", "Slows breathing rate", "Works anywhere"],
        color: [34, 197, 94, 255],
        cycle: CycleConfig::new(4.0, 0.0, 8.0, 0.0),
    },
    "triangle_breathing" => Preset {
        name: "Triangle Breathing",
        description: "Inhale, hold and exhale for the same count with no pause at the bottom.",
        category: Category::Focus,
        difficulty: Difficulty::Beginner,
        benefits: &["Sharpens attention", "Simple rhythm", "Good warm-up"],
        color: [234, 179, 8, 255],
        cycle: CycleConfig::new(4.0, 4.0, 4.0, 0.0),
    },
    "energizing_breath" => Preset {
        name: "Energizing Breath",
        description: "Quick, even breaths that raise alertness.",
        category: Category::Energy,
        difficulty: Difficulty::Intermediate,
        benefits: &["Boosts energy", "Increases alertness", "Clears mental fog"],
        color: [249, 115, 22, 255],
        cycle: CycleConfig::new(2.0, 0.0, 2.0, 0.0),
    },
    "breath_retention" => Preset {
        name: "Breath Retention",
        description: "A 1:4:2 ratio with a long hold, for experienced practitioners.",
        category: Category::Balance,
        difficulty: Difficulty::Advanced,
        benefits: &["Builds breath control", "Deepens focus", "Expands lung capacity"],
        color: [239, 68, 68, 255],
        cycle: CycleConfig::new(4.0, 16.0, 8.0, 0.0),
    },
};
