pub mod app_info;
pub mod audio;
pub mod breathing;
pub mod catalog;
pub mod context;
pub mod voice;

// Re-exports for convenience
pub use audio::{AmbientPlayer, AudioEvent, AudioService, SilentPlayer, spawn_audio_companion};
pub use breathing::{
    CycleConfig, Easing, Phase, PhaseSequencer, SequencerError, SequencerEvent, SequencerState,
    VisualCue,
};
pub use catalog::{Category, Difficulty, Technique, TechniqueCatalog};
pub use context::{AppConfig, AppConfigExt, BackgroundTasks, ConfigError};
pub use voice::{BreathKind, VoiceClient, VoiceError};
