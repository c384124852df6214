//! Text-to-speech breath sounds
//!
//! Generates inhale/exhale audio clips through a hosted voice API. The client
//! is constructed explicitly from [`glowcalm_types::VoiceSettings`]; nothing in
//! the sequencer depends on it.

mod client;
mod error;

pub use client::{BreathKind, VoiceClient, VoiceKind, breath_prompt};
pub use error::VoiceError;
