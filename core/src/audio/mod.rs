//! Ambient audio for breathing sessions
//!
//! The companion listens to sequencer activity and sends play/pause/stop
//! commands to the audio service, which owns the player. Playback errors end
//! at the service.

mod companion;
mod error;
mod events;
mod player;
mod service;

pub use companion::{audio_event_for, spawn_audio_companion};
pub use error::AudioError;
pub use events::AudioEvent;
#[cfg(feature = "playback")]
pub use player::RodioPlayer;
pub use player::{AmbientPlayer, SilentPlayer};
pub use service::{AudioSender, AudioService, create_audio_channel};
