//! Error types for text-to-speech generation

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("text-to-speech API key is missing")]
    MissingApiKey,

    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("text-to-speech request failed")]
    Request(#[from] reqwest::Error),

    #[error("text-to-speech API returned {status}: {message}")]
    Api { status: u16, message: String },
}
