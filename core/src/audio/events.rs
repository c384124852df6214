//! Audio commands sent to the ambient sound service

/// Commands that drive ambient playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    /// Start the ambient sound from the beginning
    Play,

    /// Pause playback, keeping the current source
    Pause,

    /// Stop playback and rewind
    Stop,
}
