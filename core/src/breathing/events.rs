//! Events published by the phase sequencer

use super::phase::Phase;

/// Observable sequencer transitions.
///
/// Published on a broadcast channel; the audio companion and the front-end
/// each hold their own receiver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SequencerEvent {
    /// The sequencer moved to a new phase
    PhaseChanged { phase: Phase, duration_secs: f32 },

    /// The sequence wrapped back to `Expand`
    CycleCompleted { count: u32 },

    /// The sequencer started or stopped advancing
    ActivityChanged { active: bool },

    /// State returned to its initial value
    Reset,
}
