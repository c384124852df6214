//! Error types for ambient playback

use std::path::PathBuf;
use thiserror::Error;

/// Playback failures. The audio service logs and swallows these.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no ambient sound configured")]
    NoSource,

    #[error("failed to open sound file {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode sound file {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("audio output unavailable: {0}")]
    Device(String),

    #[error("audio player thread has exited")]
    PlayerClosed,
}
