//! Shared configuration types for Glow Calm
//!
//! This crate contains serializable configuration types that are shared between
//! the core library (glowcalm-core) and the terminal front-end.

use serde::{Deserialize, Serialize};

/// Technique selected when nothing else is configured
pub const DEFAULT_TECHNIQUE: &str = "box_breathing";

/// Default text-to-speech endpoint root
pub const DEFAULT_VOICE_BASE_URL: &str = "https://api.elevenlabs.io";

fn default_true() -> bool {
    true
}

// ─────────────────────────────────────────────────────────────────────────────
// Audio Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Ambient audio settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Master enable for ambient audio
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Volume level (0-100)
    #[serde(default = "default_audio_volume")]
    pub volume: u8,

    /// Loop the ambient sound while a session is active
    #[serde(default = "default_true")]
    pub looping: bool,

    /// Ambient sound file. Relative paths resolve against the config directory.
    #[serde(default = "default_ambient_sound")]
    pub ambient_sound: Option<String>,
}

fn default_audio_volume() -> u8 {
    80
}

fn default_ambient_sound() -> Option<String> {
    Some("nature.mp3".to_string())
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: default_audio_volume(),
            looping: true,
            ambient_sound: default_ambient_sound(),
        }
    }
}

impl AudioSettings {
    /// Volume as a gain factor in `0.0..=1.0`
    pub fn gain(&self) -> f32 {
        f32::from(self.volume.min(100)) / 100.0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Voice Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Text-to-speech provider settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// Provider API key. Empty disables voice generation.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_voice_base_url")]
    pub base_url: String,

    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Deep, calm voice used for breath sounds
    #[serde(default = "default_breathing_voice")]
    pub breathing_voice_id: String,

    /// Soft, airy voice used for ambient sounds
    #[serde(default = "default_ambient_voice")]
    pub ambient_voice_id: String,

    /// Request timeout in seconds
    #[serde(default = "default_voice_timeout")]
    pub timeout_secs: u64,
}

fn default_voice_base_url() -> String {
    DEFAULT_VOICE_BASE_URL.to_string()
}

fn default_model_id() -> String {
    "eleven_monolingual_v1".to_string()
}

fn default_breathing_voice() -> String {
    "uYFJyGaibp4N2VwYQshk".to_string()
}

fn default_ambient_voice() -> String {
    "ymDCYd8puC7gYjxIamPt".to_string()
}

fn default_voice_timeout() -> u64 {
    30
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_voice_base_url(),
            model_id: default_model_id(),
            breathing_voice_id: default_breathing_voice(),
            ambient_voice_id: default_ambient_voice(),
            timeout_secs: default_voice_timeout(),
        }
    }
}

impl VoiceSettings {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Visual Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Scale targets for the breathing circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualSettings {
    /// Scale during inhale and the hold after it
    #[serde(default = "default_expanded_scale")]
    pub expanded_scale: f32,

    /// Scale during exhale and the hold after it
    #[serde(default = "default_contracted_scale")]
    pub contracted_scale: f32,

    /// Scale while the session is not running
    #[serde(default = "default_idle_scale")]
    pub idle_scale: f32,

    /// Transition time back to idle scale, in seconds
    #[serde(default = "default_idle_transition")]
    pub idle_transition_secs: f32,
}

fn default_expanded_scale() -> f32 {
    1.5
}

fn default_contracted_scale() -> f32 {
    0.8
}

fn default_idle_scale() -> f32 {
    1.0
}

fn default_idle_transition() -> f32 {
    0.5
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            expanded_scale: default_expanded_scale(),
            contracted_scale: default_contracted_scale(),
            idle_scale: default_idle_scale(),
            idle_transition_secs: default_idle_transition(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

/// Persisted application configuration.
///
/// Note: Persistence methods (load/save) are provided by glowcalm-core via the
/// `AppConfigExt` trait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Catalog key of the technique selected at startup
    #[serde(default = "default_technique")]
    pub default_technique: String,
    #[serde(default)]
    pub audio: AudioSettings,
    #[serde(default)]
    pub voice: VoiceSettings,
    #[serde(default)]
    pub visual: VisualSettings,
}

fn default_technique() -> String {
    DEFAULT_TECHNIQUE.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_technique: default_technique(),
            audio: AudioSettings::default(),
            voice: VoiceSettings::default(),
            visual: VisualSettings::default(),
        }
    }
}
