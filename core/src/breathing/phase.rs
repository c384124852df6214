//! Breathing phases and their fixed ordering

use std::fmt;

use serde::{Deserialize, Serialize};

/// One segment of a breathing cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Inhale
    #[default]
    Expand,
    /// Hold with full lungs
    HoldExpand,
    /// Exhale
    Contract,
    /// Hold with empty lungs
    HoldContract,
}

impl Phase {
    /// All phases in cycle order, including holds
    pub const ALL: [Phase; 4] = [
        Phase::Expand,
        Phase::HoldExpand,
        Phase::Contract,
        Phase::HoldContract,
    ];

    pub fn is_hold(self) -> bool {
        matches!(self, Phase::HoldExpand | Phase::HoldContract)
    }

    /// True for the inhale half of the cycle (circle grows or stays large)
    pub fn is_expanded(self) -> bool {
        matches!(self, Phase::Expand | Phase::HoldExpand)
    }

    /// Instruction shown to the user during this phase
    pub fn label(self) -> &'static str {
        match self {
            Phase::Expand => "Inhale",
            Phase::HoldExpand | Phase::HoldContract => "Hold",
            Phase::Contract => "Exhale",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Expand => "expand",
            Phase::HoldExpand => "hold-expand",
            Phase::Contract => "contract",
            Phase::HoldContract => "hold-contract",
        };
        f.write_str(name)
    }
}
