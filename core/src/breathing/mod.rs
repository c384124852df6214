//! Breathing phase sequencer
//!
//! This module provides:
//! - **Phases**: The four segments of a breathing cycle and their order
//! - **Cycle configuration**: Phase durations and the schedule built from them
//! - **Sequencer**: Timer-driven state machine that advances through phases
//! - **Visual mapping**: Scale target and easing for the breathing circle
//!
//! # Cycle
//!
//! ```text
//!   Expand ──► HoldExpand? ──► Contract ──► HoldContract? ──┐
//!     ▲                                                     │
//!     └──────────────── cycle_count += 1 ───────────────────┘
//! ```
//!
//! Holds with a zero duration are left out of the cycle.

mod cycle;
mod error;
mod events;
mod phase;
mod sequencer;
pub mod visual;


pub use cycle::{CycleConfig, MAX_PHASE_SECS, PhaseSchedule, PhaseStep};
pub use error::SequencerError;
pub use events::SequencerEvent;
pub use phase::Phase;
pub use sequencer::{PhaseSequencer, SequencerState};
pub use visual::{Easing, VisualCue};
