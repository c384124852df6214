//! HTTP client for the voice API

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;

use glowcalm_types::VoiceSettings;

use super::error::VoiceError;
use crate::breathing::Phase;

const API_KEY_HEADER: &str = "xi-api-key";
const USER_AGENT: &str = concat!("glowcalm/", env!("CARGO_PKG_VERSION"));

/// Which breath a clip should sound like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathKind {
    Inhale,
    Exhale,
}

impl BreathKind {
    /// Breath that accompanies a phase; holds are silent
    pub fn for_phase(phase: Phase) -> Option<Self> {
        match phase {
            Phase::Expand => Some(BreathKind::Inhale),
            Phase::Contract => Some(BreathKind::Exhale),
            Phase::HoldExpand | Phase::HoldContract => None,
        }
    }
}

impl fmt::Display for BreathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BreathKind::Inhale => "inhale",
            BreathKind::Exhale => "exhale",
        })
    }
}

impl FromStr for BreathKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inhale" | "in" => Ok(BreathKind::Inhale),
            "exhale" | "out" => Ok(BreathKind::Exhale),
            other => Err(format!("unknown breath kind '{other}' (expected inhale or exhale)")),
        }
    }
}

/// Configured voice to synthesize with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceKind {
    /// Deep, calm voice
    Breathing,
    /// Soft, airy voice
    Ambient,
}

/// Default prompt for a breath clip
pub fn breath_prompt(kind: BreathKind, duration_secs: f32) -> String {
    match kind {
        BreathKind::Inhale => format!(
            "[natural deep inhale breath sound through nose, {duration_secs} seconds long, no speaking, just breathing sound]"
        ),
        BreathKind::Exhale => format!(
            "[natural relaxed exhale breath sound through mouth, {duration_secs} seconds long, no speaking, just breathing sound]"
        ),
    }
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceTuning,
}

/// Low stability keeps breathing natural, high similarity keeps it consistent
#[derive(Debug, Serialize)]
struct VoiceTuning {
    stability: f32,
    similarity_boost: f32,
    style: f32,
    use_speaker_boost: bool,
}

impl Default for VoiceTuning {
    fn default() -> Self {
        Self {
            stability: 0.3,
            similarity_boost: 0.7,
            style: 0.0,
            use_speaker_boost: true,
        }
    }
}

/// Text-to-speech client holding its credential
pub struct VoiceClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model_id: String,
    breathing_voice_id: String,
    ambient_voice_id: String,
}

impl fmt::Debug for VoiceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceClient")
            .field("base_url", &self.base_url)
            .field("model_id", &self.model_id)
            .finish_non_exhaustive()
    }
}

impl VoiceClient {
    pub fn new(settings: &VoiceSettings) -> Result<Self, VoiceError> {
        if !settings.has_api_key() {
            return Err(VoiceError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(VoiceError::Client)?;
        Self::with_http(settings, http)
    }

    /// Use a preconfigured HTTP client (proxy, TLS or timeout overrides)
    pub fn with_http(settings: &VoiceSettings, http: reqwest::Client) -> Result<Self, VoiceError> {
        if !settings.has_api_key() {
            return Err(VoiceError::MissingApiKey);
        }

        Ok(Self {
            http,
            api_key: settings.api_key.trim().to_string(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model_id: settings.model_id.clone(),
            breathing_voice_id: settings.breathing_voice_id.clone(),
            ambient_voice_id: settings.ambient_voice_id.clone(),
        })
    }

    pub fn endpoint(&self, voice: VoiceKind) -> String {
        let voice_id = match voice {
            VoiceKind::Breathing => &self.breathing_voice_id,
            VoiceKind::Ambient => &self.ambient_voice_id,
        };
        format!("{}/v1/text-to-speech/{}", self.base_url, voice_id)
    }

    /// Generate a breath clip. `custom_prompt` replaces the default prompt.
    pub async fn generate_breath(
        &self,
        kind: BreathKind,
        duration_secs: f32,
        custom_prompt: Option<&str>,
    ) -> Result<Vec<u8>, VoiceError> {
        let text = match custom_prompt {
            Some(prompt) if !prompt.trim().is_empty() => prompt.to_string(),
            _ => breath_prompt(kind, duration_secs),
        };
        tracing::info!(%kind, duration_secs, "Requesting breath sound");
        self.synthesize(VoiceKind::Breathing, &text).await
    }

    /// Synthesize `text` and return the encoded audio (MPEG)
    pub async fn synthesize(&self, voice: VoiceKind, text: &str) -> Result<Vec<u8>, VoiceError> {
        let body = SpeechRequest {
            text,
            model_id: &self.model_id,
            voice_settings: VoiceTuning::default(),
        };

        let response = self
            .http
            .post(self.endpoint(voice))
            .header(ACCEPT, "audio/mpeg")
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = api_error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
            tracing::error!(status = status.as_u16(), %message, "Text-to-speech API error");
            return Err(VoiceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let audio = response.bytes().await?;
        tracing::debug!(bytes = audio.len(), "Text-to-speech request succeeded");
        Ok(audio.to_vec())
    }
}

/// Best-effort message from an error body: `detail.message`, `detail`, or the raw text
fn api_error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return Some(body.to_string());
    };
    let detail = json.get("detail").unwrap_or(&json);
    if let Some(message) = detail.get("message").and_then(|m| m.as_str()) {
        return Some(message.to_string());
    }
    match detail.as_str() {
        Some(text) => Some(text.to_string()),
        None => Some(detail.to_string()),
    }
}
